use clap::Parser;
use trellis_cli::{
    cli::Cli, config::TrellisConfig, error::handle_cli_result, error::CliResult,
    logging::configure_logging,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    configure_logging(cli.verbose, cli.debug, cli.quiet);

    let exit_code = handle_cli_result(start(cli).await);
    std::process::exit(exit_code);
}

async fn start(cli: Cli) -> CliResult<()> {
    let config = TrellisConfig::load()?.with_overrides(cli.data_dir.clone(), cli.actor.clone());
    tracing::debug!(data_dir = %config.data_dir.display(), "configuration loaded");
    trellis_cli::run(cli, config).await
}
