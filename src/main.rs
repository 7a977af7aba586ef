//! Drydock - containerized build and release automation
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use drydock::cli::{Cli, Commands};
use drydock::config::ConfigManager;
use drydock::error::DrydockResult;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> DrydockResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn, 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("drydock=warn"),
        1 => EnvFilter::new("drydock=info"),
        _ => EnvFilter::new("drydock=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Completions don't need config loading
    if let Commands::Completions { shell } = cli.command {
        return drydock::cli::commands::completions(shell);
    }

    // Load configuration
    let config_manager = if let Some(ref path) = cli.config {
        ConfigManager::with_path(path.clone())
    } else {
        ConfigManager::new()
    };

    // Find local config unless --no-local is set
    let local_config_path = if cli.no_local {
        debug!("Local config discovery disabled (--no-local)");
        None
    } else {
        let cwd = std::env::current_dir()
            .map_err(|e| drydock::error::DrydockError::io("getting current directory", e))?;
        let found = ConfigManager::find_local_config(&cwd);
        if let Some(ref path) = found {
            debug!("Found local config: {}", path.display());
        }
        found
    };

    let config = config_manager
        .load_merged(local_config_path.as_deref())
        .await?;

    // Dispatch to command
    match cli.command {
        Commands::Completions { .. } => unreachable!("Completions handled above"),
        Commands::Build(args) => drydock::cli::commands::build(args, &config).await,
        Commands::Release(args) => drydock::cli::commands::release(args, &config).await,
        Commands::Sync(args) => drydock::cli::commands::sync(args, &config).await,
        Commands::Package(args) => drydock::cli::commands::package(args, &config).await,
        Commands::Clean(args) => drydock::cli::commands::clean(args, &config).await,
        Commands::Status => drydock::cli::commands::status(&config).await,
        Commands::Config(args) => drydock::cli::commands::config(args, &config).await,
    }
}
