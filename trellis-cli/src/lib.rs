//! # Trellis CLI
//!
//! The `trellis` binary: argument parsing, layered configuration, logging and
//! rendering around the `trellis-kanban` engine.

pub mod cli;
pub mod config;
pub mod confirm;
pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod render;
pub mod session;

use cli::{Cli, Commands};
use config::TrellisConfig;
use confirm::Confirmation;
use error::CliResult;
use session::{print_operations, Session};

/// Run the parsed command line with a resolved configuration
pub async fn run(cli: Cli, config: TrellisConfig) -> CliResult<()> {
    let format = cli.format.unwrap_or_default();
    let command = cli.command.unwrap_or(Commands::Show);
    let mut out = std::io::stdout();

    if let Commands::Operations = command {
        return print_operations(format, &mut out);
    }

    let session = Session::open(&config, format, cli.quiet)
        .await?
        .with_confirmation(Confirmation::from_flags(cli.yes));
    let outcome = session.run(command, &mut out).await;
    let saved = session.finish().await;
    outcome.and(saved)
}
