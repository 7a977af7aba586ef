//! Package command - archive build output for publishing

use crate::archive;
use crate::cache::BUILD_DIR;
use crate::cli::args::PackageArgs;
use crate::cli::commands::resolve_project_dir;
use crate::config::Config;
use crate::error::{DrydockError, DrydockResult};
use crate::release::GitTags;
use crate::version::select_latest;
use chrono::Utc;
use console::style;
use std::path::PathBuf;
use tracing::debug;

/// Execute the package command
pub async fn execute(args: PackageArgs, config: &Config) -> DrydockResult<()> {
    let source_root = resolve_project_dir(&args.project)?;

    // The archive is named after the active release tag
    let tags = GitTags::new(&source_root).list().await?;
    let version = select_latest(tags.iter().map(String::as_str))?;
    debug!("Packaging version {}", version);

    let product = if config.project.name.is_empty() {
        source_root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "package".to_string())
    } else {
        config.project.name.clone()
    };

    let name = archive::stamped_archive_name(
        &product,
        &version,
        Utc::now(),
        &config.publish.stamp_format,
        &config.publish.extension,
    );

    let sources: Vec<PathBuf> = if config.publish.include.is_empty() {
        vec![source_root
            .join(BUILD_DIR)
            .join(&config.build.configuration)]
    } else {
        config
            .publish
            .include
            .iter()
            .map(|p| source_root.join(p))
            .collect()
    };
    for source in &sources {
        if !source.exists() {
            return Err(DrydockError::PathNotFound(source.clone()));
        }
    }

    let output_dir = match args.output {
        Some(dir) => dir,
        None => source_root.clone(),
    };
    let dest = output_dir.join(&name);

    archive::create_archive(&dest, &source_root, &sources).await?;
    let sidecar = archive::write_checksum(&dest)?;

    println!("{} Packaged {}", style("✓").green(), style(&name).cyan());
    println!("  Checksum: {}", sidecar.display());

    if args.upload {
        let url = config.publish.upload_url.as_deref().ok_or_else(|| {
            DrydockError::User("No publish.upload_url configured".to_string())
        })?;
        let destination = format!("{}/{}", url.trim_end_matches('/'), name);
        archive::upload(&destination, &dest).await?;
        println!("{} Uploaded to {}", style("✓").green(), destination);
    }

    Ok(())
}
