//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager, LOCAL_CONFIG_NAME};
use crate::error::{DrydockError, DrydockResult};
use console::style;
use std::env;
use tokio::fs;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config) -> DrydockResult<()> {
    let manager = ConfigManager::new();

    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(&manager),
        Some(ConfigAction::Init { force }) => init_config(&manager, force).await?,
        Some(ConfigAction::Set { key, value, local }) => {
            if local {
                set_local_value(&key, &value).await?
            } else {
                set_value(&manager, &key, &value).await?
            }
        }
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> DrydockResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("!").yellow(),
            path.display()
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    println!(
        "{} Configuration initialized at {}",
        style("✓").green(),
        path.display()
    );
    Ok(())
}

async fn set_value(manager: &ConfigManager, key: &str, value: &str) -> DrydockResult<()> {
    let mut config = manager.load().await?;
    apply_key(&mut config, key, value)?;
    manager.save(&config).await?;

    println!("{} Set {} = {}", style("✓").green(), key, value);
    Ok(())
}

async fn set_local_value(key: &str, value: &str) -> DrydockResult<()> {
    let path = env::current_dir()
        .map_err(|e| DrydockError::io("getting current directory", e))?
        .join(LOCAL_CONFIG_NAME);

    let mut config: Config = if path.exists() {
        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| DrydockError::io(format!("reading {}", path.display()), e))?;
        toml::from_str(&content).map_err(|e| DrydockError::ConfigInvalid {
            path: path.clone(),
            reason: e.to_string(),
        })?
    } else {
        Config::default()
    };

    apply_key(&mut config, key, value)?;

    let content = toml::to_string_pretty(&config)?;
    fs::write(&path, content)
        .await
        .map_err(|e| DrydockError::io(format!("writing {}", path.display()), e))?;

    println!(
        "{} Set {} = {} in {}",
        style("✓").green(),
        key,
        value,
        path.display()
    );
    Ok(())
}

/// Apply a dot-separated key path to the typed config
fn apply_key(config: &mut Config, key: &str, value: &str) -> DrydockResult<()> {
    let parts: Vec<&str> = key.split('.').collect();

    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => config.general.log_format = value.to_string(),

        ["project", "name"] => config.project.name = value.to_string(),
        ["project", "project_ext"] => config.project.project_ext = value.to_string(),
        ["project", "manifest_file"] => config.project.manifest_file = value.to_string(),

        ["container", "runtime"] => config.container.runtime = value.to_string(),
        ["container", "image"] => config.container.image = value.to_string(),
        ["container", "network"] => config.container.network = value.to_string(),

        ["build", "configuration"] => config.build.configuration = value.to_string(),
        ["build", "triple"] => config.build.triple = value.to_string(),
        ["build", "bucket"] => config.build.bucket = Some(value.to_string()),
        ["build", "command"] => {
            config.build.command = value.split_whitespace().map(str::to_string).collect()
        }

        ["release", "remote"] => config.release.remote = value.to_string(),

        ["publish", "upload_url"] => config.publish.upload_url = Some(value.to_string()),
        ["publish", "stamp_format"] => config.publish.stamp_format = value.to_string(),
        ["publish", "extension"] => config.publish.extension = value.to_string(),

        _ => {
            return Err(DrydockError::User(format!(
                "Unknown configuration key: {key}"
            )))
        }
    }

    Ok(())
}

fn parse_bool(value: &str) -> DrydockResult<bool> {
    match value {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(DrydockError::User(format!(
            "Expected a boolean, got '{value}'"
        ))),
    }
}
