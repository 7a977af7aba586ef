//! CLI argument definitions using clap derive

use crate::version::VersionPart;
use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Drydock - containerized build and release automation
///
/// Drives incremental containerized builds, normalizes dependency
/// references, and cuts semantic-version releases.
#[derive(Parser, Debug)]
#[command(name = "drydock")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "DRYDOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip local .drydock.toml discovery
    #[arg(long, global = true)]
    pub no_local: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run an incremental containerized build
    Build(BuildArgs),

    /// Tag and push the next release version
    Release(ReleaseArgs),

    /// Normalize dependency checkouts and project references
    Sync(SyncArgs),

    /// Package build output into a date-stamped archive
    Package(PackageArgs),

    /// Remove the persistent cache for a bucket
    Clean(CleanArgs),

    /// Check system health and dependencies
    Status,

    /// Show or edit configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// Source tree to build (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Build configuration (debug, release, ...)
    #[arg(long)]
    pub configuration: Option<String>,

    /// Cache bucket to mount (defaults to the target triple)
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Container image to use
    #[arg(long)]
    pub image: Option<String>,

    /// Build without the persistent artifact cache
    #[arg(long)]
    pub no_cache: bool,

    /// Build command to run inside the container (defaults from config)
    #[arg(last = true)]
    pub command: Vec<String>,
}

/// Arguments for the release command
#[derive(Parser, Debug)]
pub struct ReleaseArgs {
    /// Version component to bump
    #[arg(value_enum)]
    pub part: VersionPart,

    /// Repository to tag (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Create the tag but do not push it
    #[arg(long)]
    pub no_push: bool,

    /// Show the next version without tagging
    #[arg(long)]
    pub dry_run: bool,

    /// Print the outcome as JSON (for CI consumption)
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the sync command
#[derive(Parser, Debug)]
pub struct SyncArgs {
    /// Source tree to normalize (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,
}

/// Arguments for the package command
#[derive(Parser, Debug)]
pub struct PackageArgs {
    /// Source tree to package (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Directory to write the archive into (defaults to the source tree)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Upload the archive to the configured storage URL
    #[arg(long)]
    pub upload: bool,
}

/// Arguments for the clean command
#[derive(Parser, Debug)]
pub struct CleanArgs {
    /// Source tree to clean (defaults to current directory)
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Cache bucket to remove (defaults to the configured bucket)
    #[arg(short, long)]
    pub bucket: Option<String>,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., container.image)
        key: String,
        /// Value to set
        value: String,
        /// Write to project-local .drydock.toml instead of global config
        #[arg(long)]
        local: bool,
    },
}
