//! Configuration management for Drydock

pub mod schema;

pub use schema::Config;

use crate::error::{DrydockError, DrydockResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Project-local configuration file name
pub const LOCAL_CONFIG_NAME: &str = ".drydock.toml";

/// Configuration manager
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Create a new config manager with default path
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a config manager with a custom path
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("drydock")
            .join("config.toml")
    }

    /// Find a project-local config by walking up from `start`
    pub fn find_local_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Load the global configuration, using defaults if not present
    pub async fn load(&self) -> DrydockResult<Config> {
        if !self.config_path.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Config::default());
        }

        self.load_from_file(&self.config_path).await
    }

    /// Load configuration from a specific file
    pub async fn load_from_file(&self, path: &Path) -> DrydockResult<Config> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| DrydockError::io(format!("reading config from {}", path.display()), e))?;

        toml::from_str(&content).map_err(|e| DrydockError::ConfigInvalid {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Load global config with project-local overrides merged on top.
    ///
    /// The merge is value-level: local tables override key-by-key, so a
    /// `.drydock.toml` only stating `[container] image = ...` keeps every
    /// other global setting.
    pub async fn load_merged(&self, local: Option<&Path>) -> DrydockResult<Config> {
        let global = self.load().await?;
        let Some(local_path) = local else {
            return Ok(global);
        };

        let local_content = fs::read_to_string(local_path).await.map_err(|e| {
            DrydockError::io(format!("reading config from {}", local_path.display()), e)
        })?;
        let local_value: toml::Value =
            toml::from_str(&local_content).map_err(|e| DrydockError::ConfigInvalid {
                path: local_path.to_path_buf(),
                reason: e.to_string(),
            })?;

        let mut merged = toml::Value::try_from(&global)?;
        merge_values(&mut merged, local_value);

        merged.try_into().map_err(|e: toml::de::Error| {
            DrydockError::ConfigInvalid {
                path: local_path.to_path_buf(),
                reason: e.to_string(),
            }
        })
    }

    /// Save configuration to file
    pub async fn save(&self, config: &Config) -> DrydockResult<()> {
        self.ensure_config_dir().await?;

        let content = toml::to_string_pretty(config)?;
        fs::write(&self.config_path, content).await.map_err(|e| {
            DrydockError::io(
                format!("writing config to {}", self.config_path.display()),
                e,
            )
        })?;

        info!("Configuration saved to {}", self.config_path.display());
        Ok(())
    }

    /// Ensure the config directory exists
    async fn ensure_config_dir(&self) -> DrydockResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| DrydockError::ConfigDirCreate {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
        }
        Ok(())
    }

    /// Get the config file path
    pub fn path(&self) -> &Path {
        &self.config_path
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Recursively overlay `overlay` onto `base`; tables merge key-by-key,
/// everything else replaces
fn merge_values(base: &mut toml::Value, overlay: toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (base_slot, value) => *base_slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nonexistent.toml");
        let manager = ConfigManager::with_path(path);

        let config = manager.load().await.unwrap();
        assert_eq!(config.container.runtime, "docker");
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        let manager = ConfigManager::with_path(path);

        let mut config = Config::default();
        config.container.image = "fedora:41".to_string();

        manager.save(&config).await.unwrap();
        let loaded = manager.load().await.unwrap();

        assert_eq!(loaded.container.image, "fedora:41");
    }

    #[tokio::test]
    async fn local_overrides_merge_key_by_key() {
        let temp = TempDir::new().unwrap();
        let global_path = temp.path().join("config.toml");
        let manager = ConfigManager::with_path(global_path);

        let mut global = Config::default();
        global.build.configuration = "release".to_string();
        manager.save(&global).await.unwrap();

        let local = temp.path().join(LOCAL_CONFIG_NAME);
        std::fs::write(&local, "[container]\nimage = \"debian:12\"\n").unwrap();

        let merged = manager.load_merged(Some(local.as_path())).await.unwrap();
        assert_eq!(merged.container.image, "debian:12");
        assert_eq!(merged.build.configuration, "release");
        assert_eq!(merged.container.runtime, "docker");
    }

    #[test]
    fn find_local_config_walks_up() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(LOCAL_CONFIG_NAME), "").unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = ConfigManager::find_local_config(&nested).unwrap();
        assert_eq!(found, temp.path().join(LOCAL_CONFIG_NAME));
    }

}
