mod cli;
mod commands;
mod config;
mod error;
mod output;

use std::sync::Arc;

use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use zonedesk_core::{Confirm, Console};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a server session
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "zonedesk", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let (profile, config) = config::build_console_config(&cli.global)?;
            let yes = cli.global.yes;
            let confirm: Arc<dyn Confirm> =
                Arc::new(move |prompt: &str| commands::util::confirm(prompt, yes));
            let console = Console::new(config, confirm)?;

            debug!(command = ?cmd, profile, "dispatching command");
            session(cmd, &console, &cli.global)
                .await
                .map_err(|e| e.for_profile(&profile))
        }
    }
}

/// One console session: sign in, run the command, sign out.
async fn session(cmd: Command, console: &Console, global: &GlobalOpts) -> Result<(), CliError> {
    let mut notes = console.notifications();

    let connected = console.connect().await;
    commands::util::drain_notifications(&mut notes, global);
    connected?;

    let result = commands::dispatch(cmd, console, global).await;
    commands::util::drain_notifications(&mut notes, global);

    // Best-effort: the command's own outcome is what gets reported.
    if console.session().is_some() {
        let logout = console.logout().await;
        if let Err(e) = logout {
            warn!(error = %e, "logout failed");
        }
    }
    result
}
