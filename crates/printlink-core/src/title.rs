// ── Display titles ──

use crate::collab::Translator;
use crate::model::{LinkState, Snapshot};

const SEPARATOR: &str = " - ";

/// Join the non-empty items with `" - "`, trimming each one.
pub fn build_title<I, S>(items: I) -> String
where
    I: IntoIterator<Item = Option<S>>,
    S: AsRef<str>,
{
    let parts: Vec<String> = items
        .into_iter()
        .flatten()
        .map(|item| item.as_ref().trim().to_owned())
        .filter(|item| !item.is_empty())
        .collect();
    parts.join(SEPARATOR)
}

/// Short status for a window or tab title.
///
/// Empty while idle, `"Printing 43%"` while printing, otherwise the
/// translated state label.
pub fn status_for_title(snapshot: &Snapshot, translator: &dyn Translator) -> String {
    match snapshot.state {
        LinkState::Idle => String::new(),
        LinkState::Printing => {
            // Adding 0.0 turns a rounded -0 into 0.
            let progress = snapshot.job.progress().unwrap_or(0.0).round() + 0.0;
            format!("{} {progress:.0}%", snapshot.state.translate(translator))
        }
        state => state.translate(translator),
    }
}

/// `"<location> - <name>"` of the printer, skipping whichever is missing.
pub fn printer_label(snapshot: &Snapshot) -> String {
    let Some(printer) = &snapshot.printer else {
        return String::new();
    };
    build_title([printer.location.as_deref(), printer.name.as_deref()])
}

pub fn window_title(snapshot: &Snapshot, translator: &dyn Translator) -> String {
    let status = status_for_title(snapshot, translator);
    let label = printer_label(snapshot);
    build_title([Some(status), Some(label)])
}
