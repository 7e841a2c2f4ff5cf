//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use zonedesk_core::render::EMPTY_MESSAGE;
use zonedesk_core::{Badge, DisplayRow, DisplayTable, Level, Notification, RowActions};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// Record type label painted in its badge colour.
pub fn badge(label: &str, badge: Badge, color: bool) -> String {
    if !color {
        return label.to_owned();
    }
    match badge {
        Badge::Primary => label.blue().bold().to_string(),
        Badge::Info => label.cyan().to_string(),
        Badge::Warning => label.yellow().to_string(),
        Badge::Secondary => label.dimmed().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single item. Table mode uses `detail_fn` since detail views
/// are key/value text rather than a grid.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Echo a console notification to stderr.
pub fn print_notification(note: &Notification, quiet: bool, color: bool) {
    if quiet {
        return;
    }
    let line = match (note.level, color) {
        (Level::Success, true) => format!("{} {}", "✓".green(), note.message),
        (Level::Error, true) => format!("{} {}", "✗".red(), note.message.red()),
        (Level::Info, true) => format!("{} {}", "·".dimmed(), note.message.dimmed()),
        (Level::Success, false) => format!("ok: {}", note.message),
        (Level::Error, false) => format!("error: {}", note.message),
        (Level::Info, false) => note.message.clone(),
    };
    eprintln!("{line}");
}

// ── Record table ─────────────────────────────────────────────────────

/// Console columns plus a leading ID so rows can be addressed by
/// `records edit` and `records delete`.
#[derive(Tabled)]
struct RecordTableRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "TTL")]
    ttl: String,
    #[tabled(rename = "Type")]
    record_type: String,
    #[tabled(rename = "Content")]
    content: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Actions")]
    actions: &'static str,
}

/// Render the projected record table.
pub fn render_record_table(
    format: OutputFormat,
    table: &DisplayTable,
    color: bool,
) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => {
            if table.is_empty() {
                let message = table
                    .rows
                    .first()
                    .and_then(|row| match row {
                        DisplayRow::Empty { message } => Some(*message),
                        DisplayRow::Record(_) => None,
                    })
                    .unwrap_or(EMPTY_MESSAGE);
                return Ok(message.to_owned());
            }
            let rows: Vec<RecordTableRow> = table
                .records()
                .map(|r| RecordTableRow {
                    id: r.record_id.to_string(),
                    name: r.name.clone(),
                    ttl: r.ttl.to_string(),
                    record_type: badge(r.record_type.as_str(), r.badge, color),
                    content: r.content.clone(),
                    priority: r.priority.clone(),
                    actions: match r.actions {
                        RowActions::Editable { .. } => "edit, delete",
                        RowActions::Locked => "locked",
                    },
                })
                .collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(table, false),
        OutputFormat::JsonCompact => render_json(table, true),
        OutputFormat::Yaml => render_yaml(table),
        OutputFormat::Plain => Ok(table
            .records()
            .map(|r| r.record_id.to_string())
            .collect::<Vec<_>>()
            .join("\n")),
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)
    } else {
        serde_json::to_string_pretty(data)
    };
    out.map_err(|e| CliError::Output(e.to_string()))
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Output(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use zonedesk_core::{Record, RecordId, RecordType, ZoneId, render};

    fn record(id: i64, record_type: RecordType, name: &str, priority: Option<u16>) -> Record {
        Record {
            id: RecordId::new(id),
            zone_id: ZoneId::new(7),
            record_type,
            name: name.into(),
            content: "mail.example.com.".into(),
            priority,
            ttl: 3600,
        }
    }

    #[test]
    fn empty_table_prints_placeholder() {
        let out = render_record_table(OutputFormat::Table, &render(&[]), false);
        assert!(matches!(out, Ok(ref s) if s == "No records"));
    }

    #[test]
    fn table_shows_apex_and_priority() {
        let table = render(&[
            record(10, RecordType::Mx, "", Some(10)),
            record(11, RecordType::Cname, "www", None),
        ]);
        let Ok(out) = render_record_table(OutputFormat::Table, &table, false) else {
            panic!("table should render");
        };
        assert!(out.contains("Priority"));
        assert!(out.contains(" @ "));
        assert!(out.contains("MX"));
        assert!(out.contains(" 10 "));
        assert!(out.contains("www"));
        assert!(out.contains("edit, delete"));
    }

    #[test]
    fn soa_row_is_locked() {
        let table = render(&[record(1, RecordType::Soa, "", None)]);
        let Ok(out) = render_record_table(OutputFormat::Table, &table, false) else {
            panic!("table should render");
        };
        assert!(out.contains("locked"));
        assert!(!out.contains("edit, delete"));
    }

    #[test]
    fn plain_lists_record_ids() {
        let table = render(&[
            record(10, RecordType::Mx, "", Some(10)),
            record(11, RecordType::Cname, "www", None),
        ]);
        let out = render_record_table(OutputFormat::Plain, &table, false);
        assert!(matches!(out, Ok(ref s) if s == "10\n11"));
    }

    #[test]
    fn badge_without_color_is_plain_label() {
        assert_eq!(badge("MX", Badge::Warning, false), "MX");
    }
}
