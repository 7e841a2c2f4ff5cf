//! Sync command handler.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use zonedesk_core::{Command as CoreCommand, CommandResult, Console, SyncButton};

use crate::cli::{GlobalOpts, SyncArgs};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Debug, Serialize)]
struct SyncOutput {
    zone: String,
    reloaded: bool,
}

fn spinner(global: &GlobalOpts) -> ProgressBar {
    if global.quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

pub async fn handle(console: &Console, args: SyncArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let zone = util::resolve_zone(console, &args.zone)?;
    console.execute(CoreCommand::SelectZone(zone.id)).await?;

    // Mirror the button label while the request is in flight.
    let bar = spinner(global);
    bar.set_message(SyncButton::Busy.to_string());
    let mut rx = console.sync_control().subscribe();
    let watcher = {
        let bar = bar.clone();
        tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let state = *rx.borrow_and_update();
                bar.set_message(state.to_string());
            }
        })
    };

    let result = console.execute(CoreCommand::SyncZone).await;
    watcher.abort();
    bar.finish_and_clear();

    let reloaded = match result? {
        CommandResult::Synced { reloaded } => reloaded,
        _ => return Ok(()),
    };
    let report = SyncOutput {
        zone: zone.name,
        reloaded,
    };
    // Table mode relies on the success notification.
    let out = output::render_single(global.output, &report, |_| String::new(), |r| {
        r.reloaded.to_string()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
