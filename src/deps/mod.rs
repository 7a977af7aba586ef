//! Dependency checkout normalization
//!
//! Versioned dependency checkouts land on disk as `<Name>-<suffix>`
//! directories. Each gets a stable alias symlink with the suffix stripped,
//! and IDE project references to the versioned name are rewritten to the
//! alias so the project survives dependency updates.

pub mod rewrite;

pub use rewrite::{find_project_manifest, ReferenceRewriter, SubstringRewriter};

use crate::cache::BUILD_DIR;
use crate::error::{DrydockError, DrydockResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extensions that mark checkout-directory neighbors which are
/// metadata, not packages
const METADATA_EXTENSIONS: &[&str] = &["json", "yaml", "yml", "txt", "md", "lock", "resolved"];

/// Conventional checkouts directory under a source root
pub fn checkouts_dir(source_root: &Path) -> PathBuf {
    source_root.join(BUILD_DIR).join("checkouts")
}

/// List raw checkout directory names under the source root.
///
/// Fails when the checkouts directory itself is missing; an empty listing
/// is not an error. Names come back sorted so runs are deterministic.
pub fn list_checkouts(source_root: &Path) -> DrydockResult<Vec<String>> {
    let dir = checkouts_dir(source_root);
    if !dir.is_dir() {
        return Err(DrydockError::CheckoutsDirNotFound(dir));
    }

    let entries = fs::read_dir(&dir)
        .map_err(|e| DrydockError::io(format!("reading checkouts in {}", dir.display()), e))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| DrydockError::io(format!("reading entry in {}", dir.display()), e))?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

/// Derive the stable alias for a checkout name, or `None` to skip it.
///
/// Skipped: dotfiles, names without a version-suffix separator, and
/// metadata files that merely live alongside real checkouts. Otherwise the
/// suffix starting at the last `-` is stripped.
pub fn alias_for(name: &str) -> Option<String> {
    if name.starts_with('.') {
        return None;
    }
    if let Some((_, ext)) = name.rsplit_once('.') {
        if METADATA_EXTENSIONS.contains(&ext) {
            return None;
        }
    }
    let (alias, _suffix) = name.rsplit_once('-')?;
    if alias.is_empty() {
        return None;
    }
    Some(alias.to_string())
}

/// Ensure a symlink named `alias` exists next to `checkout`.
///
/// Returns `true` if the link was created, `false` if an entry already
/// existed. An existing entry is never overwritten or followed, whatever
/// it is; treating it as already-satisfied keeps the operation safely
/// repeatable.
pub fn ensure_symlink(checkout: &Path, alias: &str) -> DrydockResult<bool> {
    let parent = checkout
        .parent()
        .ok_or_else(|| DrydockError::PathNotFound(checkout.to_path_buf()))?;
    let link = parent.join(alias);

    // symlink_metadata does not follow, so dangling links also count
    if fs::symlink_metadata(&link).is_ok() {
        debug!("Alias already present: {}", link.display());
        return Ok(false);
    }

    let target = checkout
        .file_name()
        .ok_or_else(|| DrydockError::PathNotFound(checkout.to_path_buf()))?;

    make_symlink(target, &link)
        .map_err(|e| DrydockError::io(format!("creating symlink {}", link.display()), e))?;

    debug!("Created alias {} -> {}", link.display(), target.to_string_lossy());
    Ok(true)
}

// Links are relative (target is the sibling directory name), so moving the
// checkouts tree keeps them valid.
#[cfg(unix)]
fn make_symlink(target: &std::ffi::OsStr, link: &Path) -> std::io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(not(unix))]
fn make_symlink(_target: &std::ffi::OsStr, _link: &Path) -> std::io::Result<()> {
    Err(std::io::Error::new(
        std::io::ErrorKind::Unsupported,
        "symlink aliases require a unix platform",
    ))
}

/// Outcome of one project-sync pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Symlinks created this pass
    pub linked: usize,
    /// Aliases that already existed
    pub existing: usize,
    /// Total project references rewritten
    pub rewritten: usize,
    /// Entries skipped as non-checkouts
    pub skipped: usize,
}

/// Normalize every checkout and rewrite project references to the aliases.
///
/// Re-running after a partial failure is the recovery path: symlink
/// creation is idempotent and a reference already rewritten simply no
/// longer matches.
pub fn sync_checkouts(
    source_root: &Path,
    rewriter: &dyn ReferenceRewriter,
    project_ext: &str,
    manifest_name: &str,
) -> DrydockResult<SyncReport> {
    let manifest = find_project_manifest(source_root, project_ext, manifest_name)?;
    let dir = checkouts_dir(source_root);
    let mut report = SyncReport::default();

    for name in list_checkouts(source_root)? {
        let Some(alias) = alias_for(&name) else {
            debug!("Skipping non-checkout entry: {}", name);
            report.skipped += 1;
            continue;
        };

        // Aliases created by earlier passes list alongside the checkouts
        // themselves; only real directories are checkouts.
        let is_symlink = fs::symlink_metadata(dir.join(&name))
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        if is_symlink {
            debug!("Skipping alias entry: {}", name);
            report.skipped += 1;
            continue;
        }

        if ensure_symlink(&dir.join(&name), &alias)? {
            report.linked += 1;
        } else {
            report.existing += 1;
        }

        let replaced = rewriter.rewrite(&manifest, &name, &alias)?;
        if replaced > 0 {
            info!("Rewrote {} reference(s): {} -> {}", replaced, name, alias);
        }
        report.rewritten += replaced;
    }

    Ok(report)
}
