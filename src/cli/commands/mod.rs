//! CLI command implementations

pub mod build;
pub mod clean;
pub mod completions;
pub mod config;
pub mod package;
pub mod release;
pub mod status;
pub mod sync;

pub use build::execute as build;
pub use clean::execute as clean;
pub use completions::execute as completions;
pub use config::execute as config;
pub use package::execute as package;
pub use release::execute as release;
pub use status::execute as status;
pub use sync::execute as sync;

use crate::error::{DrydockError, DrydockResult};
use std::env;
use std::path::PathBuf;

/// Resolve the source tree a command operates on.
///
/// An explicit `--project` is canonicalized so mount mappings never embed
/// relative paths; otherwise the current directory is used.
pub(crate) fn resolve_project_dir(project: &Option<PathBuf>) -> DrydockResult<PathBuf> {
    if let Some(path) = project {
        return path.canonicalize().map_err(|e| {
            DrydockError::io(format!("resolving project path {}", path.display()), e)
        });
    }

    env::current_dir().map_err(|e| DrydockError::io("getting current directory", e))
}
