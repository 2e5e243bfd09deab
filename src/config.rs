use crate::errors::{ConfabError, ConfabResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf, sync::RwLock};

pub const DEFAULT_CHAT_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chat_url: String,
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chat_url: DEFAULT_CHAT_URL.to_string(),
            log_file: "api_calls.log".to_string(),
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

pub fn initialize_config() -> ConfabResult<()> {
    let config_path = get_config_path()?;

    // If config exists, load it
    if config_path.exists() {
        let config_str = fs::read_to_string(&config_path)
            .map_err(|e| ConfabError::config_error(format!("Failed to read config file: {}", e)))?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ConfabError::config_error(format!("Failed to parse config: {}", e)))?;

        validate_config(&config)?;

        *CONFIG.write().unwrap() = config;
    } else {
        // Create default config
        let mut config = Config::default();

        // Env var takes precedence over the built-in default endpoint
        if let Ok(url) = env::var("CONFAB_CHAT_URL") {
            config.chat_url = url;
        }

        validate_config(&config)?;

        fs::create_dir_all(config_path.parent().unwrap()).map_err(|e| {
            ConfabError::config_error(format!("Failed to create config directory: {}", e))
        })?;

        let config_str = serde_json::to_string_pretty(&config)
            .map_err(|e| ConfabError::config_error(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, config_str)
            .map_err(|e| ConfabError::config_error(format!("Failed to write config file: {}", e)))?;

        *CONFIG.write().unwrap() = config;
    }

    Ok(())
}

fn get_config_path() -> ConfabResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ConfabError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("confab").join("config.json"))
}

pub fn validate_config(config: &Config) -> ConfabResult<()> {
    if config.chat_url.is_empty() {
        return Err(ConfabError::config_error("Chat endpoint URL is required"));
    }

    if !config.chat_url.starts_with("http://") && !config.chat_url.starts_with("https://") {
        return Err(ConfabError::config_error(
            "Chat endpoint URL must start with http:// or https://",
        ));
    }

    if config.log_file.is_empty() {
        return Err(ConfabError::config_error("Log file path is required"));
    }

    Ok(())
}

pub fn get_config() -> Config {
    CONFIG.read().unwrap().clone()
}
