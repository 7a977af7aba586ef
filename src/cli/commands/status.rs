//! Status command - check system health and dependencies

use crate::config::Config;
use crate::deps;
use crate::error::DrydockResult;
use crate::orchestration::create_runtime;
use console::{style, Emoji};
use std::env;
use std::process::Stdio;
use tokio::process::Command;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "[OK] ");
static CROSS: Emoji<'_, '_> = Emoji("✗ ", "[FAIL] ");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "[WARN] ");

/// Execute the status command
pub async fn execute(config: &Config) -> DrydockResult<()> {
    println!("{}", style("Drydock System Status").bold().cyan());
    println!();

    println!("{}", style("Container runtime:").bold());
    match create_runtime(config) {
        Ok(runtime) => {
            if runtime.is_available().await {
                println!("  {} {} available", CHECK, runtime.runtime_name());
            } else {
                println!(
                    "  {} {} not found - {}",
                    CROSS,
                    runtime.runtime_name(),
                    style("builds will fail").red()
                );
            }
        }
        Err(e) => println!("  {} {}", CROSS, style(e).red()),
    }

    println!();
    println!("{}", style("Version control:").bold());
    check_cli("git", &["--version"]).await;

    println!();
    println!("{}", style("Archiver:").bold());
    check_cli("tar", &["--version"]).await;

    println!();
    println!("{}", style("Project:").bold());
    if let Ok(cwd) = env::current_dir() {
        match deps::list_checkouts(&cwd) {
            Ok(checkouts) => println!("  {} {} dependency checkout(s)", CHECK, checkouts.len()),
            Err(_) => println!(
                "  {} No checkouts directory here (run from a resolved source tree)",
                WARN
            ),
        }
        match deps::find_project_manifest(
            &cwd,
            &config.project.project_ext,
            &config.project.manifest_file,
        ) {
            Ok(manifest) => println!("  {} Project manifest: {}", CHECK, manifest.display()),
            Err(_) => println!("  {} No unambiguous project manifest here", WARN),
        }
    }

    Ok(())
}

async fn check_cli(name: &str, args: &[&str]) {
    let found = Command::new(name)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .map(|s| s.success())
        .unwrap_or(false);

    if found {
        println!("  {} {} available", CHECK, name);
    } else {
        println!("  {} {} not found", CROSS, name);
    }
}
