//! Command dispatch: bridges CLI args -> console operations -> output formatting.

pub mod config_cmd;
pub mod nsd;
pub mod password;
pub mod records;
pub mod sync;
pub mod util;
pub mod zones;

use zonedesk_core::Console;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a server-bound command to the appropriate handler.
pub async fn dispatch(cmd: Command, console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Zones(args) => zones::handle(console, args, global).await,
        Command::Records(args) => records::handle(console, args, global).await,
        Command::Sync(args) => sync::handle(console, args, global).await,
        Command::Nsd(args) => nsd::handle(console, args, global).await,
        Command::Password => password::handle(console, global).await,
        // Config and Completions are handled before a session exists
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
