//! Project-reference rewriting
//!
//! The IDE project format is owned by the external toolchain, so the
//! rewrite is a blunt whole-file substring replacement, not a structured
//! edit. Versioned checkout names always carry a version suffix, which
//! makes collisions with unrelated text implausible. The trait boundary
//! exists so a structured rewriter can be substituted without touching
//! call sites.

use crate::error::{DrydockError, DrydockResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Rewrites dependency references inside a project manifest
pub trait ReferenceRewriter {
    /// Replace every occurrence of `raw` with `alias` in the manifest,
    /// writing the file back whole. Returns the number of replacements.
    fn rewrite(&self, manifest: &Path, raw: &str, alias: &str) -> DrydockResult<usize>;
}

/// Whole-file textual replacement
pub struct SubstringRewriter;

impl ReferenceRewriter for SubstringRewriter {
    fn rewrite(&self, manifest: &Path, raw: &str, alias: &str) -> DrydockResult<usize> {
        let contents = fs::read_to_string(manifest)
            .map_err(|e| DrydockError::io(format!("reading {}", manifest.display()), e))?;

        let count = contents.matches(raw).count();
        if count == 0 {
            return Ok(0);
        }

        let rewritten = contents.replace(raw, alias);
        fs::write(manifest, rewritten)
            .map_err(|e| DrydockError::io(format!("writing {}", manifest.display()), e))?;

        Ok(count)
    }
}

/// Locate the single project manifest under a source root.
///
/// Exactly one `*.<project_ext>` directory must exist in the source root,
/// and exactly one `manifest_name` entry inside it. Zero or multiple
/// candidates at either level is a hard error, never silently resolved by
/// picking one.
pub fn find_project_manifest(
    source_root: &Path,
    project_ext: &str,
    manifest_name: &str,
) -> DrydockResult<PathBuf> {
    let suffix = format!(".{project_ext}");
    let projects = matching_entries(source_root, |name| name.ends_with(&suffix))?;

    let [project] = projects.as_slice() else {
        return Err(DrydockError::ProjectFileNotFound {
            dir: source_root.to_path_buf(),
            pattern: project_ext.to_string(),
            found: projects.len(),
        });
    };

    let manifests = matching_entries(project, |name| name == manifest_name)?;
    let [manifest] = manifests.as_slice() else {
        return Err(DrydockError::ManifestNotFound {
            project: project.clone(),
            name: manifest_name.to_string(),
            found: manifests.len(),
        });
    };

    Ok(manifest.clone())
}

fn matching_entries(
    dir: &Path,
    predicate: impl Fn(&str) -> bool,
) -> DrydockResult<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .map_err(|e| DrydockError::io(format!("reading {}", dir.display()), e))?;

    let mut matches = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| DrydockError::io(format!("reading entry in {}", dir.display()), e))?;
        if predicate(&entry.file_name().to_string_lossy()) {
            matches.push(entry.path());
        }
    }
    matches.sort();
    Ok(matches)
}
