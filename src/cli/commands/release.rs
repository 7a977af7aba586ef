//! Release command - tag and push the next version

use crate::cli::args::ReleaseArgs;
use crate::cli::commands::resolve_project_dir;
use crate::config::Config;
use crate::error::DrydockResult;
use crate::release::{cut_release, next_version, GitTags};
use console::style;
use serde_json::json;
use tracing::debug;

/// Execute the release command
pub async fn execute(args: ReleaseArgs, config: &Config) -> DrydockResult<()> {
    let repo = resolve_project_dir(&args.project)?;
    let git = GitTags::new(&repo);
    debug!("Releasing in {}", repo.display());

    if args.dry_run {
        let tags = git.list().await?;
        let (current, next) = next_version(&tags, args.part)?;
        if args.json {
            let value = json!({
                "previous": current.to_string(),
                "next": next.to_string(),
                "part": args.part.to_string(),
                "dry_run": true,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        } else {
            println!(
                "Would release {} ({} bump from {})",
                style(next).cyan().bold(),
                args.part,
                current
            );
        }
        return Ok(());
    }

    let outcome = cut_release(&git, &config.release.remote, args.part, !args.no_push).await?;

    if args.json {
        let value = json!({
            "previous": outcome.previous.to_string(),
            "released": outcome.released.to_string(),
            "part": args.part.to_string(),
            "pushed": outcome.pushed,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!(
        "{} Released {} (was {})",
        style("✓").green(),
        style(outcome.released).cyan().bold(),
        outcome.previous
    );
    if !outcome.pushed {
        println!(
            "  Tag not pushed; push later with: git push {} {}",
            config.release.remote, outcome.released
        );
    }
    Ok(())
}
