// ── Command API ──
//
// User actions on the console flow through a single `Command` enum.
// `Console::execute` routes each variant to its handler; rendered rows
// emit commands instead of carrying callbacks.

use secrecy::SecretString;

use crate::model::{Record, RecordDraft, RecordId, Zone, ZoneDraft, ZoneId};
use crate::policy::RecordForm;

/// All actions a front end can ask the console to perform.
#[derive(Debug, Clone)]
pub enum Command {
    // ── Zones ────────────────────────────────────────────────────────
    SelectZone(ZoneId),
    CreateZone(ZoneDraft),
    DeleteZone(ZoneId),
    /// Re-list zones, and the active zone's records if one is selected.
    Refresh,

    // ── Records (scoped to the active zone) ─────────────────────────
    AddRecord,
    EditRecord(RecordId),
    SaveRecord(RecordDraft),
    DeleteRecord(RecordId),
    SyncZone,

    // ── Account ──────────────────────────────────────────────────────
    ChangePassword {
        current: SecretString,
        new: SecretString,
        confirm: SecretString,
    },
}

/// What a successfully executed command produced.
#[derive(Debug, Clone)]
pub enum CommandResult {
    Ok,
    /// Records of the newly selected zone.
    Records(Vec<Record>),
    /// Form ready to be shown to the user.
    Form(RecordForm),
    Zones(Vec<Zone>),
    Synced { reloaded: bool },
    /// A response arrived for a selection that has since changed and was
    /// dropped without touching the view.
    Superseded,
}
