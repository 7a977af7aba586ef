//! Git tag collaborator
//!
//! Lists, creates and pushes tags by shelling out to git. The listing is
//! raw untrusted text; parsing and ordering happen in the version module.
//! A push only counts as accepted when the remote's response says so, a
//! zero exit code alone is not enough.

use crate::error::{DrydockError, DrydockResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Tag operations against one repository checkout
pub struct GitTags {
    repo: PathBuf,
}

impl GitTags {
    /// Create a tag collaborator for the repository at `repo`
    pub fn new(repo: impl Into<PathBuf>) -> Self {
        Self { repo: repo.into() }
    }

    /// The repository this collaborator operates on
    pub fn repo(&self) -> &Path {
        &self.repo
    }

    /// Execute a git command in the repository and return the output
    async fn exec(&self, args: &[&str]) -> DrydockResult<std::process::Output> {
        debug!("Executing: git -C {} {:?}", self.repo.display(), args);

        Command::new("git")
            .arg("-C")
            .arg(&self.repo)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    DrydockError::CliNotFound {
                        name: "git".to_string(),
                        hint: "Install git and ensure it is on PATH".to_string(),
                    }
                } else {
                    DrydockError::command_failed(format!("git {:?}", args), e)
                }
            })
    }

    /// List raw tag strings. Zero or more may be malformed; callers filter.
    pub async fn list(&self) -> DrydockResult<Vec<String>> {
        let output = self.exec(&["tag", "--list"]).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DrydockError::command_exec("git tag --list", stderr));
        }

        let tags = String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
        Ok(tags)
    }

    /// Create a tag locally
    pub async fn create(&self, tag: &str) -> DrydockResult<()> {
        let output = self.exec(&["tag", tag]).await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DrydockError::command_exec(format!("git tag {tag}"), stderr));
        }

        info!("Created tag {}", tag);
        Ok(())
    }

    /// Push a tag to a remote, requiring acceptance evidence in the output.
    ///
    /// git reports an accepted tag as `* [new tag] <tag> -> <tag>` on
    /// stderr. A run that exits zero without that marker (or rejects the
    /// ref) is treated as a failed push.
    pub async fn push(&self, remote: &str, tag: &str) -> DrydockResult<()> {
        let output = self.exec(&["push", remote, tag]).await?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let accepted = output.status.success() && tag_accepted(&stdout, &stderr, tag);

        if !accepted {
            return Err(DrydockError::TagPushRejected {
                tag: tag.to_string(),
                stderr: stderr.trim().to_string(),
            });
        }

        info!("Pushed tag {} to {}", tag, remote);
        Ok(())
    }
}

/// Whether push output confirms the remote accepted the tag
fn tag_accepted(stdout: &str, stderr: &str, tag: &str) -> bool {
    let confirms = |text: &str| text.contains("[new tag]") && text.contains(tag);
    confirms(stdout) || confirms(stderr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_requires_marker_and_tag() {
        let stderr = " * [new tag]         1.2.3 -> 1.2.3\n";
        assert!(tag_accepted("", stderr, "1.2.3"));
        assert!(!tag_accepted("", stderr, "9.9.9"));
        assert!(!tag_accepted("", "Everything up-to-date\n", "1.2.3"));
        assert!(!tag_accepted("", "", "1.2.3"));
    }

    #[test]
    fn accepted_on_either_stream() {
        let line = " * [new tag] 0.4.0 -> 0.4.0";
        assert!(tag_accepted(line, "", "0.4.0"));
        assert!(tag_accepted("", line, "0.4.0"));
    }
}
