// ── Table renderer ──
//
// Pure projection from a record list to display rows. No I/O, no
// state: the same input always yields the same table. Rows carry record
// ids, and front ends turn clicks into commands via `DisplayRow::command`.

use serde::Serialize;
use strum::Display;

use crate::command::Command;
use crate::model::{Record, RecordId, RecordType};

pub const COLUMNS: [&str; 6] = ["Name", "TTL", "Type", "Content", "Priority", "Actions"];
pub const APEX_MARKER: &str = "@";
pub const PRIORITY_PLACEHOLDER: &str = "-";
pub const EMPTY_MESSAGE: &str = "No records";

/// Category colour for a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Secondary,
    Info,
    Warning,
    Primary,
}

impl Badge {
    pub fn for_type(record_type: &RecordType) -> Self {
        match record_type {
            RecordType::Soa => Self::Secondary,
            RecordType::Ns => Self::Info,
            RecordType::Mx => Self::Warning,
            _ => Self::Primary,
        }
    }
}

/// Affordances offered on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RowActions {
    Editable { record_id: RecordId },
    /// Server-managed row; shown with a lock instead of buttons.
    Locked,
}

/// A user click on a row button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRow {
    pub record_id: RecordId,
    pub name: String,
    pub ttl: u32,
    pub record_type: RecordType,
    pub badge: Badge,
    pub content: String,
    pub priority: String,
    pub actions: RowActions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "row", rename_all = "lowercase")]
pub enum DisplayRow {
    Record(RecordRow),
    /// Placeholder shown when the zone has no records.
    Empty { message: &'static str },
}

impl DisplayRow {
    /// Map a button click on this row to the command it triggers.
    /// Locked and placeholder rows have no buttons.
    pub fn command(&self, action: RowAction) -> Option<Command> {
        let Self::Record(RecordRow {
            actions: RowActions::Editable { record_id },
            ..
        }) = self
        else {
            return None;
        };
        Some(match action {
            RowAction::Edit => Command::EditRecord(*record_id),
            RowAction::Delete => Command::DeleteRecord(*record_id),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayTable {
    pub columns: [&'static str; 6],
    pub rows: Vec<DisplayRow>,
}

impl Default for DisplayTable {
    fn default() -> Self {
        render(&[])
    }
}

impl DisplayTable {
    /// Record rows only, skipping the placeholder.
    pub fn records(&self) -> impl Iterator<Item = &RecordRow> {
        self.rows.iter().filter_map(|row| match row {
            DisplayRow::Record(r) => Some(r),
            DisplayRow::Empty { .. } => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.records().next().is_none()
    }
}

pub fn render(records: &[Record]) -> DisplayTable {
    let rows = if records.is_empty() {
        vec![DisplayRow::Empty {
            message: EMPTY_MESSAGE,
        }]
    } else {
        records.iter().map(|r| DisplayRow::Record(render_row(r))).collect()
    };

    DisplayTable {
        columns: COLUMNS,
        rows,
    }
}

fn render_row(record: &Record) -> RecordRow {
    let name = if record.name.is_empty() {
        APEX_MARKER.to_owned()
    } else {
        record.name.clone()
    };
    let actions = if record.record_type.is_soa() {
        RowActions::Locked
    } else {
        RowActions::Editable {
            record_id: record.id,
        }
    };

    RecordRow {
        record_id: record.id,
        name,
        ttl: record.ttl,
        record_type: record.record_type.clone(),
        badge: Badge::for_type(&record.record_type),
        content: record.content.clone(),
        priority: record
            .priority
            .map_or_else(|| PRIORITY_PLACEHOLDER.to_owned(), |p| p.to_string()),
        actions,
    }
}
