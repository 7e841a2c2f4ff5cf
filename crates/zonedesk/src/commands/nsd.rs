//! NSD status handler.

use zonedesk_core::{Console, NsdStatus};

use crate::cli::{GlobalOpts, NsdArgs, NsdCommand};
use crate::error::CliError;
use crate::output;

fn detail(status: &NsdStatus) -> String {
    let mut lines = vec![format!(
        "Running:     {}",
        if status.running { "yes" } else { "no" }
    )];
    if let Some(perms) = status.permissions.as_object() {
        let mut keys: Vec<_> = perms.keys().collect();
        keys.sort();
        for key in keys {
            let value = &perms[key];
            let shown = value
                .as_str()
                .map_or_else(|| value.to_string(), str::to_owned);
            lines.push(format!("{key}: {shown}"));
        }
    }
    lines.join("\n")
}

pub async fn handle(console: &Console, args: NsdArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        NsdCommand::Status => {
            let status = console.nsd_status().await?;
            let out = output::render_single(global.output, &status, detail, |s| {
                let state = if s.running { "running" } else { "stopped" };
                state.to_owned()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
