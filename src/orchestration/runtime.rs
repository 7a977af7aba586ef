//! Container runtime abstraction
//!
//! Provides a trait for one-shot containerized build execution that can be
//! implemented by CLI-compatible backends (Docker, Podman).

use crate::error::DrydockResult;
use crate::orchestration::container::ContainerConfig;
use async_trait::async_trait;

/// Captured result of a containerized command run to completion
#[derive(Debug, Clone)]
pub struct BuildOutput {
    /// Process exit code (-1 when terminated by signal)
    pub code: i32,
    /// Captured standard output
    pub stdout: String,
    /// Captured standard error
    pub stderr: String,
}

impl BuildOutput {
    /// Whether the contained command exited successfully
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Abstract container runtime interface
///
/// The engine hands a fully constructed option set to the runtime and
/// classifies failures from exit code and captured error text only.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Check if the runtime is available on this system
    async fn is_available(&self) -> bool;

    /// Ensure the runtime is usable, with an actionable error if not
    async fn ensure_ready(&self) -> DrydockResult<()>;

    /// Run a command in a fresh container to completion
    async fn run_build(
        &self,
        config: &ContainerConfig,
        command: &[String],
    ) -> DrydockResult<BuildOutput>;

    /// Get the human-readable runtime name for display
    fn runtime_name(&self) -> &'static str;
}
