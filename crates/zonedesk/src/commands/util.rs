//! Shared helpers for command handlers.

use std::io::IsTerminal;

use tokio::sync::broadcast;
use tracing::debug;

use zonedesk_core::{Console, Level, Notification, Zone};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

/// Resolve a zone argument (name or numeric ID) against the loaded zone list.
///
/// Names compare case-insensitively and ignore a trailing root dot.
pub fn resolve_zone(console: &Console, identifier: &str) -> Result<Zone, CliError> {
    let zones = console.store().zones();
    let wanted = identifier.trim().trim_end_matches('.');

    let by_name = zones.iter().find(|z| z.name.eq_ignore_ascii_case(wanted));
    let by_id = || zones.iter().find(|z| z.id.to_string() == wanted);

    by_name
        .or_else(by_id)
        .cloned()
        .ok_or_else(|| CliError::NotFound {
            resource_type: "zone".into(),
            identifier: identifier.into(),
            list_command: "zones list".into(),
        })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the answer is no.
pub fn confirm(message: &str, yes_flag: bool) -> bool {
    if yes_flag {
        return true;
    }
    if !std::io::stdin().is_terminal() {
        debug!(message, "no terminal for confirmation, declining");
        return false;
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Print whatever the console announced since the last drain.
///
/// Errors are skipped: the command's own error is reported on exit.
/// Informational notes only show with `-v`.
pub fn drain_notifications(rx: &mut broadcast::Receiver<Notification>, global: &GlobalOpts) {
    let color = output::should_color(global.color);
    loop {
        match rx.try_recv() {
            Ok(note) => {
                let show = match note.level {
                    Level::Success => true,
                    Level::Info => global.verbose > 0,
                    Level::Error => false,
                };
                if show {
                    output::print_notification(&note, global.quiet, color);
                }
            }
            Err(broadcast::error::TryRecvError::Lagged(n)) => {
                debug!(skipped = n, "notification receiver lagged");
            }
            Err(_) => break,
        }
    }
}

/// Format an optional value for a detail view.
pub fn or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".into(), |v| v.to_string())
}
