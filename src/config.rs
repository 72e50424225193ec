use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{AppError, Result};

pub const ENV_DB_PATH: &str = "RECIPES_DB_PATH";
pub const ENV_HOST: &str = "RECIPES_HOST";
pub const ENV_PORT: &str = "RECIPES_PORT";
pub const ENV_API_URL: &str = "RECIPES_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Address the API server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Base URL of the recipe collection, used by the client.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_db_path() -> String {
    let data_dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recipe-book");
    std::fs::create_dir_all(&data_dir).ok();
    data_dir.join("recipes.db").to_string_lossy().to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_api_url() -> String {
    "http://localhost:3000/api/recipes".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            host: default_host(),
            port: default_port(),
            api_url: default_api_url(),
        }
    }
}

impl Config {
    /// Load the config file (creating it with defaults when missing), then
    /// apply overrides from the environment and `.env`.
    pub fn load() -> Result<Self> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Failed to load .env file: {}", e);
            }
        }

        let mut config = Self::load_from(&Self::config_path())?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("recipe-book")
            .join("config.toml")
    }

    /// Apply overrides from a variable lookup, normally the process environment.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db_path) = lookup(ENV_DB_PATH) {
            tracing::info!("{ENV_DB_PATH} set, using {db_path}");
            self.db_path = db_path;
        }
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|e| AppError::Config(format!("Invalid {ENV_PORT} value {port:?}: {e}")))?;
        }
        if let Some(api_url) = lookup(ENV_API_URL) {
            self.api_url = api_url;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_url)?;
        if url.cannot_be_a_base() {
            return Err(AppError::Config(format!(
                "api_url must be an http(s) URL, got {}",
                self.api_url
            )));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
