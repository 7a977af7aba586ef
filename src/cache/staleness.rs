//! Build-clean decision: best-effort staleness detection
//!
//! Before a containerized build, prior output for the same configuration
//! may have been produced for a different platform triple. Reusing it
//! would poison the incremental state, so it has to be purged. Detection
//! is a heuristic, not a guarantee.

use super::BUILD_DIR;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Decide whether prior build output for `configuration` must be purged.
///
/// Reads the per-configuration build manifest
/// (`.build/<configuration>.yaml`) if present and readable: output is kept
/// only when the manifest mentions the expected `triple`. When the
/// manifest is absent or unreadable, presence of the per-configuration
/// output directory alone is treated as possibly-stale.
pub fn should_clean(source_root: &Path, configuration: &str, triple: &str) -> bool {
    let build_dir = source_root.join(BUILD_DIR);
    let manifest = build_dir.join(format!("{configuration}.yaml"));

    match fs::read_to_string(&manifest) {
        Ok(contents) => {
            let stale = !contents.contains(triple);
            debug!(
                "Manifest {} {} triple {}",
                manifest.display(),
                if stale { "does not mention" } else { "mentions" },
                triple
            );
            stale
        }
        Err(_) => {
            // No readable manifest: conservative fallback on output presence
            let output_dir = build_dir.join(configuration);
            let exists = output_dir.is_dir();
            debug!(
                "No readable manifest at {}, output dir {} {}",
                manifest.display(),
                output_dir.display(),
                if exists { "exists" } else { "is absent" }
            );
            exists
        }
    }
}
