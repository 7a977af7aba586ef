//! Release workflow: select, bump, create, confirm, push
//!
//! Read-back after tag creation is deliberate: a release that git silently
//! dropped must fail here, as its own error, not as a parse problem later.

use crate::error::{DrydockError, DrydockResult};
use crate::release::tags::GitTags;
use crate::version::{bump_tag, select_latest, Version, VersionPart};
use tracing::debug;

/// A completed (or previewed) release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    /// The version the repository was at before
    pub previous: Version,
    /// The version that was (or would be) tagged
    pub released: Version,
    /// Whether the tag was pushed to the remote
    pub pushed: bool,
}

/// Compute the next version from a raw tag listing without touching git.
pub fn next_version(tags: &[String], part: VersionPart) -> DrydockResult<(Version, Version)> {
    let current = select_latest(tags.iter().map(String::as_str))?;
    // The tag travels as text between selection and bump; re-validate
    let next = bump_tag(&current.to_string(), part)?;
    Ok((current, next))
}

/// Cut a release: tag the next version and optionally push it.
///
/// Steps: list tags, select the latest, bump `part`, create the tag,
/// re-read the listing to confirm the tag exists, then push. A read-back
/// miss is a hard [`DrydockError::TagReadbackMismatch`].
pub async fn cut_release(
    git: &GitTags,
    remote: &str,
    part: VersionPart,
    push: bool,
) -> DrydockResult<ReleaseOutcome> {
    let tags = git.list().await?;
    let (previous, released) = next_version(&tags, part)?;
    let tag = released.to_string();
    debug!("Releasing {} (previous {})", tag, previous);

    git.create(&tag).await?;

    // Confirm the tag is really there before telling anyone about it
    let readback = git.list().await?;
    if !readback.iter().any(|t| t == &tag) {
        return Err(DrydockError::TagReadbackMismatch { tag });
    }

    if push {
        git.push(remote, &tag).await?;
    }

    Ok(ReleaseOutcome {
        previous,
        released,
        pushed: push,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn next_version_bumps_latest() {
        let (current, next) =
            next_version(&tags(&["1.0.0", "1.2.3", "junk"]), VersionPart::Minor).unwrap();
        assert_eq!(current, Version::new(1, 2, 3));
        assert_eq!(next, Version::new(1, 3, 0));
    }

    #[test]
    fn next_version_numeric_selection() {
        let (current, next) =
            next_version(&tags(&["1.999.1", "1.1000.1"]), VersionPart::Patch).unwrap();
        assert_eq!(current, Version::new(1, 1000, 1));
        assert_eq!(next, Version::new(1, 1000, 2));
    }

    #[test]
    fn next_version_reports_empty_repo() {
        assert!(matches!(
            next_version(&tags(&[]), VersionPart::Patch),
            Err(DrydockError::NoValidTag)
        ));
        assert!(matches!(
            next_version(&tags(&["nightly", "rc-1"]), VersionPart::Patch),
            Err(DrydockError::NoValidTag)
        ));
    }
}
