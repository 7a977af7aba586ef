//! Sync command - normalize dependency checkouts and project references

use crate::cli::args::SyncArgs;
use crate::cli::commands::resolve_project_dir;
use crate::config::Config;
use crate::deps::{sync_checkouts, SubstringRewriter};
use crate::error::DrydockResult;
use console::style;
use tracing::debug;

/// Execute the sync command
pub async fn execute(args: SyncArgs, config: &Config) -> DrydockResult<()> {
    let source_root = resolve_project_dir(&args.project)?;
    debug!("Syncing {}", source_root.display());

    let report = sync_checkouts(
        &source_root,
        &SubstringRewriter,
        &config.project.project_ext,
        &config.project.manifest_file,
    )?;

    println!(
        "{} Sync complete: {} linked, {} already linked, {} reference(s) rewritten, {} skipped",
        style("✓").green(),
        report.linked,
        report.existing,
        report.rewritten,
        report.skipped
    );
    Ok(())
}
