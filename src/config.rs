//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Model used when the config file and environment name none
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Base URL of the Generative Language API
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com";

/// Request timeout applied by the HTTP client
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Generative Language API key
    pub api_key: Option<String>,
    /// Model name passed to generateContent
    pub model: Option<String>,
    /// Base URL of the model endpoint
    pub api_url: Option<String>,
    /// Per-request timeout in seconds
    pub request_timeout_secs: Option<u64>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "cementron", "cementron-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs::read_to_string(&path)?;
                serde_json::from_str(&content)?
            }
            _ => Self::default(),
        };

        config.apply_overrides(
            std::env::var("GEMINI_API_KEY").ok(),
            std::env::var("CEMENTRON_MODEL").ok(),
            std::env::var("CEMENTRON_API_URL").ok(),
        );
        Ok(config)
    }

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let content = serde_json::to_string_pretty(self)?;
            fs::write(&path, content)?;
        }
        Ok(())
    }

    /// Environment variables win over file contents
    fn apply_overrides(
        &mut self,
        api_key: Option<String>,
        model: Option<String>,
        api_url: Option<String>,
    ) {
        if api_key.is_some() {
            self.api_key = api_key;
        }
        if model.is_some() {
            self.model = model;
        }
        if api_url.is_some() {
            self.api_url = api_url;
        }
    }

    pub fn api_key(&self) -> Option<String> {
        self.api_key.clone()
    }

    pub fn model_name(&self) -> String {
        self.model.clone().unwrap_or_else(|| DEFAULT_MODEL.to_string())
    }

    pub fn api_url(&self) -> String {
        self.api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
