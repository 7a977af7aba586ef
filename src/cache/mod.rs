//! Persistent build-artifact caching across container invocations
//!
//! Each cache bucket (one per build configuration/platform) owns a private
//! copy of the build-output directory on the host. That copy gets
//! bind-mounted over the conventional build-output path inside the
//! container, so rebuilds are incremental and buckets never clobber each
//! other's state.

pub mod staleness;

pub use staleness::should_clean;

use crate::error::{DrydockError, DrydockResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Conventional build-output directory name under a source root.
///
/// The toolchain writes here inside the container; buckets live here on
/// the host.
pub const BUILD_DIR: &str = ".build";

/// A host-path/container-path pair describing one bind mount.
///
/// Recomputed fresh on every call; only the directories it names persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountMapping {
    /// Host-side directory inside the cache bucket
    pub host: PathBuf,
    /// Container-side path the build tool writes to
    pub container: PathBuf,
}

impl MountMapping {
    /// Generate the `host:container` mount string for the container runtime
    pub fn volume_arg(&self) -> String {
        format!("{}:{}", self.host.display(), self.container.display())
    }
}

/// Compute and ensure the cache directory for a bucket.
///
/// The directory is `<source_root>/.build/<bucket>` with a nested `.build`
/// beneath it that mirrors what the container sees. Creation is recursive
/// and idempotent: repeated builds are the normal case, so calling this
/// twice must neither error nor change the result.
pub fn cache_directory(source_root: &Path, bucket: &str) -> DrydockResult<PathBuf> {
    let dir = source_root.join(BUILD_DIR).join(bucket);
    let nested = dir.join(BUILD_DIR);
    fs::create_dir_all(&nested)
        .map_err(|e| DrydockError::io(format!("creating cache directory {}", nested.display()), e))?;
    debug!("Cache bucket ready: {}", dir.display());
    Ok(dir)
}

/// Compute the bind mount for a bucket, ensuring its host side exists.
///
/// Host side is the bucket's mirrored `.build`; container side is the
/// source root's `.build`, i.e. the path the build tool always writes to.
/// Generic over the bucket name; policy about which buckets are safe to
/// mount belongs to the call site.
pub fn mount_mapping(source_root: &Path, bucket: &str) -> DrydockResult<MountMapping> {
    let cache_dir = cache_directory(source_root, bucket)?;
    Ok(MountMapping {
        host: cache_dir.join(BUILD_DIR),
        container: source_root.join(BUILD_DIR),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn cache_directory_layout() {
        let root = TempDir::new().unwrap();
        let dir = cache_directory(root.path(), "x86_64-unknown-linux-gnu").unwrap();

        assert_eq!(
            dir,
            root.path().join(".build").join("x86_64-unknown-linux-gnu")
        );
        assert!(dir.join(".build").is_dir());
    }

    #[test]
    fn cache_directory_idempotent() {
        let root = TempDir::new().unwrap();
        let first = cache_directory(root.path(), "linux").unwrap();
        let second = cache_directory(root.path(), "linux").unwrap();
        assert_eq!(first, second);
        assert!(second.join(".build").is_dir());
    }

    #[test]
    fn buckets_do_not_collide() {
        let root = TempDir::new().unwrap();
        let a = cache_directory(root.path(), "linux").unwrap();
        let b = cache_directory(root.path(), "macos").unwrap();
        assert_ne!(a, b);
        assert!(a.is_dir());
        assert!(b.is_dir());
    }

    #[test]
    fn mount_mapping_sides() {
        let root = TempDir::new().unwrap();
        let mapping = mount_mapping(root.path(), "linux").unwrap();

        assert_eq!(
            mapping.host,
            root.path().join(".build").join("linux").join(".build")
        );
        assert_eq!(mapping.container, root.path().join(".build"));
        assert!(mapping.host.is_dir());
    }

    #[test]
    fn mount_mapping_volume_arg() {
        let mapping = MountMapping {
            host: PathBuf::from("/work/.build/linux/.build"),
            container: PathBuf::from("/work/.build"),
        };
        assert_eq!(
            mapping.volume_arg(),
            "/work/.build/linux/.build:/work/.build"
        );
    }

    #[test]
    fn mount_mapping_recomputed_identically() {
        let root = TempDir::new().unwrap();
        let first = mount_mapping(root.path(), "linux").unwrap();
        let second = mount_mapping(root.path(), "linux").unwrap();
        assert_eq!(first, second);
    }
}
