use crate::config::schema::AppConfig;
use crate::error::{CronWfError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variables that override the file, in the workflow CLI's naming.
pub const ENV_SERVER: &str = "ARGO_SERVER";
pub const ENV_TOKEN: &str = "ARGO_TOKEN";
pub const ENV_NAMESPACE: &str = "ARGO_NAMESPACE";

/// Get the configuration file path based on platform
pub fn get_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|p| p.join("cronwf"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

/// Load configuration from the default path, creating it if missing
pub fn load_config() -> Result<AppConfig> {
    let config_path = get_config_path();

    if !config_path.exists() {
        tracing::info!(
            "Config file not found at {:?}, creating default",
            config_path
        );
        return init_config();
    }

    load_config_from(&config_path)
}

/// Load configuration from an explicit file
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        CronWfError::Config(format!("Failed to read config from {:?}: {}", path, e))
    })?;

    let config: AppConfig = toml::from_str(&content)?;

    tracing::info!("Loaded config from {:?}", path);
    Ok(config)
}

/// Save configuration to the default path
pub fn save_config(config: &AppConfig) -> Result<()> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to an explicit file
pub fn save_config_to(config: &AppConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            CronWfError::Config(format!(
                "Failed to create config directory {:?}: {}",
                parent, e
            ))
        })?;
    }

    let content = toml::to_string_pretty(config)?;

    fs::write(path, content).map_err(|e| {
        CronWfError::Config(format!("Failed to write config to {:?}: {}", path, e))
    })?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

/// Initialize default configuration and save to file
pub fn init_config() -> Result<AppConfig> {
    let config = AppConfig::default();
    save_config(&config)?;
    Ok(config)
}

/// Apply `ARGO_SERVER`, `ARGO_TOKEN` and `ARGO_NAMESPACE` on top of `config`.
pub fn apply_env_overrides(config: &mut AppConfig) {
    apply_overrides(config, |key| std::env::var(key).ok());
}

fn apply_overrides(config: &mut AppConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(server) = lookup(ENV_SERVER).filter(|s| !s.is_empty()) {
        config.server.base_url = if server.contains("://") {
            server
        } else {
            format!("https://{}", server)
        };
    }
    if let Some(token) = lookup(ENV_TOKEN).filter(|s| !s.is_empty()) {
        config.server.auth_token = Some(token);
    }
    if let Some(namespace) = lookup(ENV_NAMESPACE) {
        config.ui.default_namespace = namespace;
    }
}
