//! Build command - run an incremental containerized build

use crate::cache::{self, BUILD_DIR};
use crate::cli::args::BuildArgs;
use crate::cli::commands::resolve_project_dir;
use crate::config::Config;
use crate::error::{DrydockError, DrydockResult};
use crate::orchestration::{self, create_runtime, current_user, ContainerConfig};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::time::Duration;
use tracing::{debug, info};

/// Execute the build command
pub async fn execute(args: BuildArgs, config: &Config) -> DrydockResult<()> {
    let runtime = create_runtime(config)?;
    debug!("Using runtime: {}", runtime.runtime_name());

    let source_root = resolve_project_dir(&args.project)?;
    debug!("Source root: {}", source_root.display());

    let pb = create_progress_bar(&format!("Checking {}...", runtime.runtime_name()));
    runtime.ensure_ready().await?;

    let configuration = args
        .configuration
        .as_deref()
        .unwrap_or(&config.build.configuration);
    let triple = &config.build.triple;
    let bucket = args.bucket.as_deref().unwrap_or(config.build.bucket_name());

    // Purge incompatible prior output before mounting anything over it
    if cache::should_clean(&source_root, configuration, triple) {
        let stale = source_root.join(BUILD_DIR).join(configuration);
        info!("Purging possibly-stale output: {}", stale.display());
        if stale.exists() {
            fs::remove_dir_all(&stale)
                .map_err(|e| DrydockError::io(format!("removing {}", stale.display()), e))?;
        }
    }

    // The source tree mounts at its own path so the toolchain sees the
    // same layout inside and outside the container.
    let root_str = source_root.display().to_string();
    let mut volumes = vec![format!("{root_str}:{root_str}")];

    if args.no_cache {
        debug!("Artifact cache disabled for this build");
    } else {
        let mapping = cache::mount_mapping(&source_root, bucket)?;
        debug!("Cache mount: {}", mapping.volume_arg());
        volumes.push(mapping.volume_arg());
    }
    // Only the build-output bucket is mounted. Sharing the resolved-
    // dependency cache across container invocations corrupts toolchain
    // state (known limitation); the mapper supports it, this call site
    // must not request it.

    volumes.extend(config.container.volumes.iter().cloned());

    let container_config = ContainerConfig {
        image: args
            .image
            .clone()
            .unwrap_or_else(|| config.container.image.clone()),
        workdir: root_str,
        volumes,
        env: config.container.env.clone(),
        network: config.container.network.clone(),
        user: current_user(),
    };

    let command = if args.command.is_empty() {
        config.build.command.clone()
    } else {
        args.command.clone()
    };
    if command.is_empty() {
        return Err(DrydockError::User(
            "No build command given; set build.command or pass one after --".to_string(),
        ));
    }

    pb.set_message(format!("Building in {}...", container_config.image));
    let output = runtime.run_build(&container_config, &command).await?;
    pb.finish_and_clear();

    if !output.success() {
        return Err(DrydockError::BuildCommand {
            command: command.join(" "),
            code: output.code,
            output: orchestration::build_error_output(&output.stdout, &output.stderr),
        });
    }

    println!(
        "{} Build succeeded for bucket {}",
        style("✓").green(),
        style(bucket).cyan()
    );
    Ok(())
}

fn create_progress_bar(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(msg.to_string());
    pb
}
