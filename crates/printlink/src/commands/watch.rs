//! `printlink watch`: poll in the background, print on change.

use std::sync::Arc;

use chrono::Local;
use tracing::debug;

use printlink_core::title::window_title;
use printlink_core::{EnglishLabels, Monitor, Snapshot};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::error::CliError;
use crate::output;

pub async fn handle(monitor: &Monitor, args: &WatchArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let mut updates = monitor.context().subscribe();
    monitor.start().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last = String::new();
    let mut printed = 0_usize;
    let result = loop {
        if args.count.is_some_and(|limit| printed >= limit) {
            break Ok(());
        }

        tokio::select! {
            biased;
            _ = &mut ctrl_c => {
                debug!("interrupted");
                break Ok(());
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break Ok(());
                }
                let snapshot = Arc::clone(&updates.borrow_and_update());
                let line = match render_line(global.output, &snapshot) {
                    Ok(line) => line,
                    Err(e) => break Err(e),
                };
                if line != last {
                    output::print_output(&decorate(global.output, &line), global.quiet);
                    last = line;
                    printed += 1;
                }
            }
        }
    };

    monitor.shutdown().await;
    result
}

/// The line compared against the previous one to detect a change.
fn render_line(format: OutputFormat, snap: &Snapshot) -> Result<String, CliError> {
    match format {
        OutputFormat::Json | OutputFormat::JsonCompact => Ok(serde_json::to_string(snap)?),
        OutputFormat::Plain | OutputFormat::Table => Ok(title_or_state(snap)),
    }
}

fn decorate(format: OutputFormat, line: &str) -> String {
    match format {
        OutputFormat::Table => format!("[{}] {line}", Local::now().format("%H:%M:%S")),
        _ => line.to_owned(),
    }
}

/// Window title, or the bare state label when the title would be empty.
fn title_or_state(snap: &Snapshot) -> String {
    let title = window_title(snap, &EnglishLabels);
    if title.is_empty() {
        snap.state.translate(&EnglishLabels)
    } else {
        title
    }
}
