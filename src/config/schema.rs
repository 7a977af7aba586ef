//! Configuration schema for Drydock
//!
//! Configuration is stored at `~/.config/drydock/config.toml`, with
//! project-local overrides in `.drydock.toml`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Project layout settings
    pub project: ProjectConfig,

    /// Container settings
    pub container: ContainerConfig,

    /// Build settings
    pub build: BuildConfig,

    /// Release settings
    pub release: ReleaseConfig,

    /// Packaging and upload settings
    pub publish: PublishConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Enable verbose logging
    pub verbose: bool,

    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            log_format: "text".to_string(),
        }
    }
}

/// Project layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Product name used in archive file names (source dir name if empty)
    pub name: String,

    /// Extension of the IDE project directory to normalize
    pub project_ext: String,

    /// Manifest file name inside the project directory
    pub manifest_file: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            project_ext: "xcodeproj".to_string(),
            manifest_file: "project.pbxproj".to_string(),
        }
    }
}

/// Container configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// Runtime binary: "docker" or "podman"
    pub runtime: String,

    /// Base image to build in
    pub image: String,

    /// Environment variables to set
    pub env: HashMap<String, String>,

    /// Additional volume mounts (host:container)
    pub volumes: Vec<String>,

    /// Network mode
    pub network: String,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            image: "ubuntu:24.04".to_string(),
            env: HashMap::new(),
            volumes: vec![],
            network: "host".to_string(),
        }
    }
}

/// Build configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build configuration name (debug, release, ...)
    pub configuration: String,

    /// Target platform triple the container builds for
    pub triple: String,

    /// Cache bucket name (defaults to the triple)
    pub bucket: Option<String>,

    /// Build command run inside the container
    pub command: Vec<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            configuration: "debug".to_string(),
            triple: "x86_64-unknown-linux-gnu".to_string(),
            bucket: None,
            command: vec!["make".to_string()],
        }
    }
}

impl BuildConfig {
    /// The cache bucket for this build, falling back to the triple
    pub fn bucket_name(&self) -> &str {
        self.bucket.as_deref().unwrap_or(&self.triple)
    }
}

/// Release configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Remote to push release tags to
    pub remote: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}

/// Packaging and upload configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Storage URL archives are PUT to (uploads disabled if unset)
    pub upload_url: Option<String>,

    /// strftime pattern for the archive date stamp
    pub stamp_format: String,

    /// Archive file extension
    pub extension: String,

    /// Paths (relative to the source root) to include in the archive;
    /// defaults to the per-configuration build output
    pub include: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            upload_url: None,
            stamp_format: "%Y-%m-%d".to_string(),
            extension: "tar.gz".to_string(),
            include: vec![],
        }
    }
}
