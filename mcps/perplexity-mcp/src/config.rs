//! Configuration loading for perplexity-mcp
//!
//! Configuration is loaded from:
//! 1. `--config` flag or environment variable PERPLEXITY_CONFIG_PATH
//! 2. ~/.binks/perplexity.toml
//! 3. Default values
//!
//! Environment variables PERPLEXITY_API_KEY, PERPLEXITY_MODEL and
//! PERPLEXITY_BASE_URL override whatever the file sets.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::{ModelId, UnknownModel};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Upstream API configuration
    #[serde(default)]
    pub api: ApiConfig,
    /// Search behaviour
    #[serde(default)]
    pub search: SearchConfig,
}

/// Perplexity API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token; usually supplied through PERPLEXITY_API_KEY
    #[serde(default)]
    pub key: String,
    /// Request timeout in seconds; unset means no client-side timeout
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
    /// User-Agent header sent with each request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Search configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Model used when auto-selection finds no keyword match
    #[serde(default = "default_model")]
    pub default_model: String,
}

/// Startup configuration errors; any of these stops the server
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PERPLEXITY_API_KEY environment variable is required")]
    MissingApiKey,

    #[error(transparent)]
    InvalidModel(#[from] UnknownModel),
}

// Default value functions
fn default_base_url() -> String {
    "https://api.perplexity.ai".to_string()
}

fn default_user_agent() -> String {
    concat!("perplexity-mcp/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_model() -> String {
    ModelId::default().to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            key: String::new(),
            timeout_seconds: None,
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_model: default_model(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults, then apply environment
    /// overrides
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = path.or_else(Self::find_config_path);

        let mut config = match config_path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) => {
                tracing::info!("Config file {} not found, using defaults", path.display());
                Self::default()
            }
            None => {
                tracing::info!("No config path specified, using defaults");
                Self::default()
            }
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::info!("Loading config from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup("PERPLEXITY_API_KEY") {
            self.api.key = key;
        }
        if let Some(model) = lookup("PERPLEXITY_MODEL").filter(|m| !m.is_empty()) {
            self.search.default_model = model;
        }
        if let Some(url) = lookup("PERPLEXITY_BASE_URL").filter(|u| !u.is_empty()) {
            self.api.base_url = url;
        }
    }

    /// Check the settings needed to serve and return the default model
    pub fn validate(&self) -> Result<ModelId, ConfigError> {
        if self.api.key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(self.search.default_model.trim().parse::<ModelId>()?)
    }

    /// Find the configuration file path
    fn find_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("PERPLEXITY_CONFIG_PATH") {
            return Some(PathBuf::from(path));
        }

        if let Ok(home) = std::env::var("HOME") {
            return Some(PathBuf::from(home).join(".binks").join("perplexity.toml"));
        }

        None
    }
}
