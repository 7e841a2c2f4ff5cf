//! Orchestration layer between `zonedesk-api` and front ends.
//!
//! This crate owns the console state and the rules around it:
//!
//! - **[`Console`]**: facade for one signed-in session. Login/logout,
//!   zone listing and creation, record CRUD scoped to the selected zone,
//!   NSD sync, and the [`Command`] dispatcher all go through it.
//!
//! - **Zone selection** ([`ZoneSelection`]): the single active-zone slot.
//!   Async responses carry a [`SelectionTicket`] and are dropped if the
//!   selection moved on before they arrived.
//!
//! - **Record repository** ([`RecordRepository`]): create/update/delete
//!   always followed by a full re-list; the table is never patched.
//!
//! - **Role policy** ([`RolePolicy`]) and **validation** ([`validate`]):
//!   pure functions deciding which inputs a user sees and whether a form
//!   may be submitted at all.
//!
//! - **Table renderer** ([`render()`]): pure projection of records into
//!   display rows whose buttons map to commands.
//!
//! - **View store** ([`ViewStore`]) and [`Notifier`]: `watch` and
//!   `broadcast` channels that front ends subscribe to.

pub mod command;
pub mod config;
pub mod console;
mod convert;
pub mod error;
pub mod model;
pub mod notify;
pub mod policy;
pub mod records;
pub mod render;
pub mod selection;
pub mod store;
pub mod sync;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use config::{ConsoleConfig, PageContext, TlsVerification};
pub use console::{Confirm, Console};
pub use error::{AuthError, CoreError, RequestKind};
pub use notify::{Level, Notification, Notifier};
pub use policy::{FormMode, RecordForm, RolePolicy, ZoneField, priority_visible, zone_form_fields};
pub use records::RecordRepository;
pub use render::{Badge, DisplayRow, DisplayTable, RecordRow, RowAction, RowActions, render};
pub use selection::{Fenced, SelectionState, SelectionTicket, ZoneSelection};
pub use store::{RecordView, ViewStore};
pub use sync::{SyncButton, SyncControl, SyncReport, SyncTrigger};

pub use model::{
    Record, RecordDraft, RecordId, RecordType, Role, Session, ValidRecord, ValidZone, Zone,
    ZoneDraft, ZoneId,
};

// Wire types front ends display directly.
pub use zonedesk_api::NsdStatus;
