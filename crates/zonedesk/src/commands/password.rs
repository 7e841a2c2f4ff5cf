//! Password change handler.

use zonedesk_core::{Command as CoreCommand, Console};

use crate::cli::GlobalOpts;
use crate::config::prompt_password;
use crate::error::CliError;

/// Prompt for the current and new password and hand all three to the
/// server. Whether the two new entries must match is the server's call.
pub async fn handle(console: &Console, _global: &GlobalOpts) -> Result<(), CliError> {
    let current = prompt_password("Current password: ")?;
    let new = prompt_password("New password: ")?;
    let confirm = prompt_password("Confirm new password: ")?;

    console
        .execute(CoreCommand::ChangePassword {
            current,
            new,
            confirm,
        })
        .await?;
    Ok(())
}
