//! Clean command - remove a bucket's persistent cache

use crate::cache::BUILD_DIR;
use crate::cli::args::CleanArgs;
use crate::cli::commands::resolve_project_dir;
use crate::config::Config;
use crate::error::{DrydockError, DrydockResult};
use console::style;
use std::fs;
use std::io::{self, Write};
use tracing::info;

/// Execute the clean command
pub async fn execute(args: CleanArgs, config: &Config) -> DrydockResult<()> {
    let source_root = resolve_project_dir(&args.project)?;
    let bucket = args.bucket.as_deref().unwrap_or(config.build.bucket_name());
    let target = source_root.join(BUILD_DIR).join(bucket);

    if !target.exists() {
        println!("Nothing to clean for bucket {bucket}.");
        return Ok(());
    }

    if !args.yes && !confirm(&format!("Remove cache {}?", target.display()))? {
        return Err(DrydockError::User("Aborted".to_string()));
    }

    fs::remove_dir_all(&target)
        .map_err(|e| DrydockError::io(format!("removing {}", target.display()), e))?;
    info!("Removed cache bucket {}", target.display());

    println!(
        "{} Removed cache for bucket {}",
        style("✓").green(),
        style(bucket).cyan()
    );
    Ok(())
}

fn confirm(prompt: &str) -> DrydockResult<bool> {
    print!("{prompt} [y/N] ");
    io::stdout()
        .flush()
        .map_err(|e| DrydockError::io("flushing stdout", e))?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(|e| DrydockError::io("reading confirmation", e))?;

    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
