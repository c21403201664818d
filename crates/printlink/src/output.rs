//! Output formatting: table, JSON, plain.
//!
//! Table uses `tabled`, JSON uses serde, plain emits a single line.

use std::io::{self, Write};

use tabled::{Table, Tabled, settings::Style};

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a single serde-serializable item in the chosen format.
///
/// `table_fn` builds the human view, `plain_fn` the one-line scripting view.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    table_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize + ?Sized,
{
    Ok(match format {
        OutputFormat::Table => table_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Plain => plain_fn(data),
    })
}

pub fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

// ── Value formatting ─────────────────────────────────────────────────

/// `"-"` for missing values.
pub fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}

pub fn temperature(current: Option<f64>, target: Option<f64>) -> String {
    match (current, target) {
        (Some(c), Some(t)) => format!("{c:.1}°C / {t:.1}°C"),
        (Some(c), None) => format!("{c:.1}°C"),
        (None, Some(t)) => format!("- / {t:.1}°C"),
        (None, None) => "-".into(),
    }
}

/// `1h 02m 03s`, dropping leading zero units.
pub fn duration(secs: Option<u64>) -> String {
    let Some(secs) = secs else {
        return "-".into();
    };
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m:02}m {s:02}s")
    } else if m > 0 {
        format!("{m}m {s:02}s")
    } else {
        format!("{s}s")
    }
}

pub fn bytes(size: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let Some(size) = size else {
        return "-".into();
    };
    let mut value = size;
    let mut unit = 0;
    let mut rem = 0;
    while value >= 1024 && unit < UNITS.len() - 1 {
        rem = value % 1024;
        value /= 1024;
        unit += 1;
    }
    let unit_name = UNITS.get(unit).copied().unwrap_or("B");
    if unit == 0 {
        format!("{value} {unit_name}")
    } else {
        format!("{value}.{} {unit_name}", rem * 10 / 1024)
    }
}
