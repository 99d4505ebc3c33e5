//! Market assistant CLI application.

mod cli;

use anyhow::{Context, Result};
use assistant_config::load_config;
use assistant_monitor::setup_logging;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let loaded = load_config(&cli.config);

    // CLI flags win over the logging section of the file
    let (json_logs, log_dir) = match &loaded {
        Ok(config) => (
            cli.json_logs || config.logging.is_json(),
            cli.log_dir
                .clone()
                .or_else(|| config.logging.dir.as_ref().map(PathBuf::from)),
        ),
        Err(_) => (cli.json_logs, cli.log_dir.clone()),
    };
    let _guard = setup_logging(cli.log_level.as_str(), json_logs, log_dir.as_deref());

    if let Commands::ValidateConfig = cli.command {
        return cli::commands::validate::run(&cli.config, loaded);
    }

    let config = loaded
        .with_context(|| format!("Failed to load configuration {}", cli.config.display()))?;

    match cli.command {
        Commands::Scan => cli::commands::scan::run(config).await,
        Commands::Research(args) => cli::commands::research::run(args, config).await,
        Commands::Daemon => cli::commands::daemon::run(config).await,
        Commands::Bought(args) => cli::commands::positions::bought(args, config).await,
        Commands::Sold(args) => cli::commands::positions::sold(args, config).await,
        Commands::Positions => cli::commands::positions::list(config).await,
        Commands::ValidateConfig => Ok(()),
    }
}
