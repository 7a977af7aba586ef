//! Packaging: archive naming, checksums, creation and upload
//!
//! Naming is a pure function of its inputs; there is no shared formatter
//! state between calls. Archive bytes and transport belong to
//! collaborators: `tar` builds the archive from a destination plus a list
//! of source paths, and the storage backend receives a single HTTP PUT.

use crate::error::{DrydockError, DrydockResult};
use crate::version::Version;
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Render the date-stamped archive file name for a release.
///
/// `stamp_format` is a strftime pattern applied to `when`; the result is
/// `<product>-<version>-<stamp>.<extension>`.
pub fn stamped_archive_name(
    product: &str,
    version: &Version,
    when: DateTime<Utc>,
    stamp_format: &str,
    extension: &str,
) -> String {
    format!(
        "{product}-{version}-{stamp}.{extension}",
        stamp = when.format(stamp_format)
    )
}

/// Write a `<archive>.sha256` sidecar in `sha256sum -c` format.
///
/// Returns the sidecar path.
pub fn write_checksum(archive: &Path) -> DrydockResult<PathBuf> {
    let contents = fs::read(archive)
        .map_err(|e| DrydockError::io(format!("reading archive {}", archive.display()), e))?;

    let mut hasher = Sha256::new();
    hasher.update(&contents);
    let digest = hex::encode(hasher.finalize());

    let file_name = archive
        .file_name()
        .ok_or_else(|| DrydockError::PathNotFound(archive.to_path_buf()))?
        .to_string_lossy()
        .into_owned();

    let sidecar = archive.with_file_name(format!("{file_name}.sha256"));
    fs::write(&sidecar, format!("{digest}  {file_name}\n"))
        .map_err(|e| DrydockError::io(format!("writing checksum {}", sidecar.display()), e))?;

    debug!("Checksum written: {}", sidecar.display());
    Ok(sidecar)
}

/// Build a gzipped tar archive at `dest` from `sources`.
///
/// Paths in `sources` are archived relative to `base` so the archive does
/// not embed absolute host paths.
pub async fn create_archive(dest: &Path, base: &Path, sources: &[PathBuf]) -> DrydockResult<()> {
    let mut args: Vec<String> = vec![
        "-czf".to_string(),
        dest.display().to_string(),
        "-C".to_string(),
        base.display().to_string(),
    ];
    for source in sources {
        let relative = source.strip_prefix(base).unwrap_or(source);
        args.push(relative.display().to_string());
    }

    debug!("Executing: tar {:?}", args);

    let output = Command::new("tar")
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| DrydockError::command_failed(format!("tar {:?}", args), e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DrydockError::command_exec("tar", stderr));
    }

    info!("Archive created: {}", dest.display());
    Ok(())
}

/// Upload an archive to a storage URL with a single HTTP PUT.
pub async fn upload(url: &str, archive: &Path) -> DrydockResult<()> {
    let bytes = fs::read(archive)
        .map_err(|e| DrydockError::io(format!("reading archive {}", archive.display()), e))?;

    let url = url.to_string();
    let display_url = url.clone();
    info!("Uploading {} ({} bytes)", archive.display(), bytes.len());

    // ureq is blocking; keep it off the async runtime threads
    let result = tokio::task::spawn_blocking(move || {
        ureq::put(url.as_str())
            .header("content-type", "application/octet-stream")
            .send(&bytes[..])
    })
    .await
    .map_err(|e| DrydockError::Internal(format!("upload task failed: {e}")))?;

    match result {
        Ok(response) if response.status().is_success() => Ok(()),
        Ok(response) => Err(DrydockError::UploadFailed {
            url: display_url,
            reason: format!("server responded with status {}", response.status()),
        }),
        Err(e) => Err(DrydockError::UploadFailed {
            url: display_url,
            reason: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn when() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 9, 12, 30, 0).unwrap()
    }

    #[test]
    fn stamped_name_is_pure() {
        let version = Version::new(1, 2, 3);
        let first = stamped_archive_name("widget", &version, when(), "%Y-%m-%d", "tar.gz");
        let second = stamped_archive_name("widget", &version, when(), "%Y-%m-%d", "tar.gz");

        assert_eq!(first, "widget-1.2.3-2024-03-09.tar.gz");
        assert_eq!(first, second);
    }

    #[test]
    fn stamped_name_follows_pattern() {
        let version = Version::new(0, 4, 0);
        let name = stamped_archive_name("widget", &version, when(), "%Y%m%d%H%M", "tar.gz");
        assert_eq!(name, "widget-0.4.0-202403091230.tar.gz");
    }

    #[test]
    fn checksum_sidecar_format() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("widget-1.2.3.tar.gz");
        fs::write(&archive, b"archive bytes").unwrap();

        let sidecar = write_checksum(&archive).unwrap();

        assert_eq!(sidecar, dir.path().join("widget-1.2.3.tar.gz.sha256"));
        let contents = fs::read_to_string(&sidecar).unwrap();
        let (digest, name) = contents.trim_end().split_once("  ").unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(name, "widget-1.2.3.tar.gz");
    }

    #[test]
    fn checksum_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("a.tar.gz");
        fs::write(&archive, b"same bytes").unwrap();

        let first = fs::read_to_string(write_checksum(&archive).unwrap()).unwrap();
        let second = fs::read_to_string(write_checksum(&archive).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
