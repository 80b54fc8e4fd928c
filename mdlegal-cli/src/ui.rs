//! Output helpers for the mdlegal CLI
//!
//! Spinners for the simulated load and plain-text tables for list pages.
//!
//! # Quiet Mode
//!
//! Spinners are suppressed when:
//! - `--quiet` flag is passed
//! - `MDLEGAL_QUIET=1` environment variable is set
//! - stderr is not a TTY (piped output)

use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use mdlegal_core::format::format_brl;
use mdlegal_core::{EntitySchema, FieldKind, FieldValue, Page, Record};

/// Global quiet mode state
static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initialize quiet mode from flags and environment
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("MDLEGAL_QUIET").map(|v| v == "1").unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&true)
}

/// Create a spinner that respects quiet mode
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

fn finish(pb: Option<ProgressBar>, msg: String) {
    if let Some(pb) = pb {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            pb.set_style(style);
        }
        pb.finish_with_message(msg);
    }
}

/// Finish a spinner with a success message
pub fn finish_success(pb: Option<ProgressBar>, msg: impl Into<String>) {
    finish(pb, format!("✓ {}", msg.into()));
}

/// Finish a spinner with an error message
pub fn finish_error(pb: Option<ProgressBar>, msg: impl Into<String>) {
    finish(pb, format!("✗ {}", msg.into()));
}

/// Async operation wrapped in a spinner
pub async fn with_spinner_async<T, E: std::fmt::Display>(
    msg: impl Into<String>,
    success_msg: impl Into<String>,
    f: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let msg = msg.into();
    let success_msg = success_msg.into();
    let pb = spinner(&msg);

    match f.await {
        Ok(result) => {
            finish_success(pb, success_msg);
            Ok(result)
        }
        Err(e) => {
            finish_error(pb, format!("{}: {}", msg, e));
            Err(e)
        }
    }
}

/// Display text of a cell; money columns get currency formatting
pub fn format_cell(kind: FieldKind, value: &FieldValue) -> String {
    match (kind, value) {
        (FieldKind::Money, FieldValue::Number(n)) => format_brl(*n),
        _ => value.display(),
    }
}

/// Header row plus formatted cells for each record (id first)
pub fn table_rows<R: Record>(
    schema: &EntitySchema,
    records: &[R],
) -> (Vec<String>, Vec<Vec<String>>) {
    let mut header = vec!["#".to_string()];
    header.extend(schema.columns().map(str::to_string));

    let rows = records
        .iter()
        .map(|record| {
            let mut cells = vec![record.id().to_string()];
            cells.extend(schema.fields.iter().map(|(name, kind)| {
                record
                    .field(name)
                    .map(|value| format_cell(*kind, &value))
                    .unwrap_or_default()
            }));
            cells
        })
        .collect();

    (header, rows)
}

/// Render rows as an aligned plain-text table
pub fn render_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(header));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
    out.push_str(&rule.join("  "));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

/// Full text for one page: table, "Mostrando X–Y de Z" and page position
pub fn render_page<R: Record>(schema: &EntitySchema, page: &Page<R>) -> String {
    let (header, rows) = table_rows(schema, &page.items);
    let mut out = if rows.is_empty() {
        "Nenhum registro encontrado.\n".to_string()
    } else {
        render_table(&header, &rows)
    };
    out.push_str(&format!(
        "{} · página {} de {}\n",
        page.summary(),
        page.page,
        page.total_pages()
    ));
    out
}

/// Placeholder rows shown while a page is loading
pub fn skeleton_rows(schema: &EntitySchema, count: usize) -> Vec<Vec<String>> {
    let cells = schema.fields.len() + 1;
    (0..count).map(|_| vec!["░░░░".to_string(); cells]).collect()
}
