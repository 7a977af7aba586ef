//! Orchestration module for container runtimes
//!
//! The core only constructs the option set for a containerized build; a
//! CLI-compatible runtime (Docker or Podman) executes it.

mod cli_runtime;
mod container;
mod runtime;

pub use cli_runtime::CliRuntime;
pub use container::{current_user, ContainerConfig};
pub use runtime::{BuildOutput, ContainerRuntime};

use crate::config::Config;
use crate::error::{DrydockError, DrydockResult};

/// Max number of output lines to include in build error messages.
const BUILD_ERROR_TAIL_LINES: usize = 50;

/// Create the container runtime selected by configuration.
pub fn create_runtime(config: &Config) -> DrydockResult<Box<dyn ContainerRuntime>> {
    match config.container.runtime.as_str() {
        "docker" => Ok(Box::new(CliRuntime::docker())),
        "podman" => Ok(Box::new(CliRuntime::podman())),
        other => Err(DrydockError::User(format!(
            "Unsupported container runtime '{other}' (expected docker or podman)"
        ))),
    }
}

/// Extract the useful tail of build output for error diagnostics.
///
/// Combines stdout and stderr, then returns the last `BUILD_ERROR_TAIL_LINES`
/// lines so error messages are actionable without being overwhelming.
pub(crate) fn build_error_output(stdout: &str, stderr: &str) -> String {
    let lines: Vec<&str> = stdout.lines().chain(stderr.lines()).collect();
    let total = lines.len();
    let tail: Vec<&str> = if total > BUILD_ERROR_TAIL_LINES {
        lines[total - BUILD_ERROR_TAIL_LINES..].to_vec()
    } else {
        lines
    };
    tail.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn create_runtime_from_config() {
        let mut config = Config::default();
        config.container.runtime = "docker".to_string();
        assert_eq!(create_runtime(&config).unwrap().runtime_name(), "Docker");

        config.container.runtime = "podman".to_string();
        assert_eq!(create_runtime(&config).unwrap().runtime_name(), "Podman");
    }

    #[test]
    fn create_runtime_rejects_unknown() {
        let mut config = Config::default();
        config.container.runtime = "lxc".to_string();
        assert!(create_runtime(&config).is_err());
    }

    #[test]
    fn error_tail_keeps_last_lines() {
        let stdout: String = (0..100).map(|i| format!("line {i}\n")).collect();
        let tail = build_error_output(&stdout, "final error");
        assert!(tail.contains("final error"));
        assert!(tail.contains("line 99"));
        assert!(!tail.contains("line 10\n"));
    }
}
