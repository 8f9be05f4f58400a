//! Configuration handling for the signup form

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default registration endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5173/api/users";

/// Default transport timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "SIGNUP_FORM_ENDPOINT";

/// User configuration for the signup form
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Registration endpoint URL
    pub endpoint: Option<String>,
    /// Seconds before a submission is abandoned
    pub timeout_secs: Option<u64>,
}

impl AppConfig {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "signup-form", "signup-form")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from `path`, or defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            self.save_to(&path)?;
        }
        Ok(())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Endpoint to submit to: environment, then file, then default
    pub fn endpoint(&self) -> String {
        self.resolve_endpoint(std::env::var(ENDPOINT_ENV).ok())
    }

    fn resolve_endpoint(&self, from_env: Option<String>) -> String {
        from_env
            .filter(|value| !value.trim().is_empty())
            .or_else(|| self.endpoint.clone())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// Transport timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
