//! Error types for Drydock
//!
//! All modules use `DrydockResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Drydock operations
pub type DrydockResult<T> = Result<T, DrydockError>;

/// All errors that can occur in Drydock
#[derive(Error, Debug)]
pub enum DrydockError {
    // Environment errors
    #[error("Container runtime not found: {name}. {hint}")]
    RuntimeNotFound { name: String, hint: String },

    #[error("Required CLI not found: {name}. {hint}")]
    CliNotFound { name: String, hint: String },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Versioning errors
    #[error("No valid version tag found in the repository")]
    NoValidTag,

    #[error("Current tag is not a valid version: {tag}")]
    InvalidCurrentTag { tag: String },

    #[error("Tag {tag} was created but did not appear when read back")]
    TagReadbackMismatch { tag: String },

    #[error("Push of tag {tag} was not accepted by the remote: {stderr}")]
    TagPushRejected { tag: String, stderr: String },

    // Project layout errors
    #[error("Checkouts directory not found: {0}")]
    CheckoutsDirNotFound(PathBuf),

    #[error("Expected exactly one *.{pattern} project in {dir}, found {found}")]
    ProjectFileNotFound {
        dir: PathBuf,
        pattern: String,
        found: usize,
    },

    #[error("Expected exactly one {name} in {project}, found {found}")]
    ManifestNotFound {
        project: PathBuf,
        name: String,
        found: usize,
    },

    // Build errors
    #[error("Build command failed: {command}, exit code: {code}\n{output}")]
    BuildCommand {
        command: String,
        code: i32,
        output: String,
    },

    #[error("Image pull failed: {image}: {reason}")]
    ImagePull { image: String, reason: String },

    // Publish errors
    #[error("Upload to {url} failed: {reason}")]
    UploadFailed { url: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    // Process errors
    #[error("Command failed: {command}")]
    CommandFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Command execution error: {command}, stderr: {stderr}")]
    CommandExecution { command: String, stderr: String },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl DrydockError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::CommandFailed {
            command: command.into(),
            source,
        }
    }

    /// Create a command execution error
    pub fn command_exec(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandExecution {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::RuntimeNotFound { hint, .. } | Self::CliNotFound { hint, .. } => {
                Some(hint.clone())
            }
            Self::NoValidTag => Some("Create an initial tag, e.g.: git tag 0.1.0".to_string()),
            Self::CheckoutsDirNotFound(_) => {
                Some("Resolve dependencies first so checkouts exist".to_string())
            }
            _ => None,
        }
    }
}
