//! CLI-driven container runtime
//!
//! Implements the ContainerRuntime trait by shelling out to a
//! Docker-CLI-compatible binary. Docker and rootless Podman accept the
//! same argument set for everything this engine needs.

use crate::error::{DrydockError, DrydockResult};
use crate::orchestration::container::ContainerConfig;
use crate::orchestration::runtime::{BuildOutput, ContainerRuntime};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info};

/// Container runtime backed by a docker-compatible CLI binary
pub struct CliRuntime {
    binary: &'static str,
    name: &'static str,
    install_hint: &'static str,
}

impl CliRuntime {
    /// Runtime using the `docker` binary
    pub fn docker() -> Self {
        Self {
            binary: "docker",
            name: "Docker",
            install_hint: "Install Docker from https://docs.docker.com/engine/install",
        }
    }

    /// Runtime using the `podman` binary
    pub fn podman() -> Self {
        Self {
            binary: "podman",
            name: "Podman",
            install_hint: "Install Podman from https://podman.io/docs/installation",
        }
    }

    /// Check if the runtime binary responds
    async fn installed(&self) -> bool {
        Command::new(self.binary)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Execute a runtime command and return the output
    async fn exec(&self, args: &[&str]) -> DrydockResult<std::process::Output> {
        debug!("Executing: {} {:?}", self.binary, args);

        Command::new(self.binary)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| DrydockError::command_failed(format!("{} {:?}", self.binary, args), e))
    }

    /// Pull an image
    async fn pull(&self, image: &str) -> DrydockResult<()> {
        info!("Pulling image: {}", image);

        let output = self.exec(&["pull", image]).await?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            Err(DrydockError::ImagePull {
                image: image.to_string(),
                reason: stderr.to_string(),
            })
        }
    }

    /// Check if image exists locally
    async fn image_exists(&self, image: &str) -> DrydockResult<bool> {
        let output = self.exec(&["image", "inspect", image]).await?;
        Ok(output.status.success())
    }
}

#[async_trait]
impl ContainerRuntime for CliRuntime {
    async fn is_available(&self) -> bool {
        self.installed().await
    }

    async fn ensure_ready(&self) -> DrydockResult<()> {
        if !self.installed().await {
            return Err(DrydockError::RuntimeNotFound {
                name: self.binary.to_string(),
                hint: self.install_hint.to_string(),
            });
        }
        Ok(())
    }

    async fn run_build(
        &self,
        config: &ContainerConfig,
        command: &[String],
    ) -> DrydockResult<BuildOutput> {
        // Ensure image is available
        if !self.image_exists(&config.image).await? {
            self.pull(&config.image).await?;
        }

        let mut args = vec!["run".to_string(), "--rm".to_string()];

        // Working directory
        args.push("-w".to_string());
        args.push(config.workdir.clone());

        // Network
        args.push("--network".to_string());
        args.push(config.network.clone());

        // User mapping
        if let Some(ref user) = config.user {
            args.push("--user".to_string());
            args.push(user.clone());
        }

        // Volumes
        for v in &config.volumes {
            args.push("-v".to_string());
            args.push(v.clone());
        }

        // Environment variables
        for (k, v) in &config.env {
            args.push("-e".to_string());
            args.push(format!("{}={}", k, v));
        }

        // Image
        args.push(config.image.clone());

        // Command to run
        args.extend(command.iter().cloned());

        debug!("Running build container: {} {:?}", self.binary, args);

        let args_refs: Vec<&str> = args.iter().map(String::as_str).collect();
        let output = self.exec(&args_refs).await?;

        Ok(BuildOutput {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn runtime_name(&self) -> &'static str {
        self.name
    }
}
