//! CLI module for the dashboard ETL
//!
//! Fetching and processing can run separately, each against the flat
//! snapshot files named in the configuration.

use clap::{Parser, Subcommand};
use tracing::info;

use crate::{
    configuration::{get_configuration, set_configuration, AppState, Config, State},
    error::Error,
    handler::{fetch_task, process_task},
    provider::HTTP,
};

/// DeFi dashboard ETL
#[derive(Parser)]
#[command(name = "etl")]
#[command(about = "Protocol and chain revenue analytics", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// Fetch raw protocol and chain data into the raw snapshot
    Fetch,

    /// Derive analytics from the raw snapshot into the processed snapshot
    Process,

    /// Fetch, then process (default if no command specified)
    Run,
}

/// Initialize configuration and return Config
pub fn init_config() -> Result<Config, Error> {
    set_configuration()?;
    get_configuration()
}

pub async fn run_fetch(config: Config) -> Result<(), Error> {
    let http = HTTP::new(&config)?;
    let app_state = AppState::new(State::new(config, http));

    fetch_task::start_task(app_state).await?
}

pub async fn run_process(config: Config) -> Result<(), Error> {
    process_task::start_task(config).await?
}

pub async fn run(command: Commands) -> Result<(), Error> {
    let config = init_config()?;
    info!("Configuration loaded successfully");

    match command {
        Commands::Fetch => run_fetch(config).await,
        Commands::Process => run_process(config).await,
        Commands::Run => {
            run_fetch(config.clone()).await?;
            run_process(config).await
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_commands() {
        let cli = Cli::try_parse_from(["etl"]).unwrap();
        assert_eq!(cli.command, None);

        let cli = Cli::try_parse_from(["etl", "process"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Process));

        assert!(Cli::try_parse_from(["etl", "serve"]).is_err());
    }
}
