//! `AppConfig` struct and TOML read/write.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Backend API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Backend API configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    /// API root, e.g. `http://localhost:8000/api/`.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    String::from(catalog_api::DEFAULT_BASE_URL)
}

const fn default_timeout_secs() -> u64 {
    30
}

impl ApiConfig {
    /// Parses `base_url`, preferring `override_url` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen URL is not a valid absolute URL.
    pub fn resolve_base_url(&self, override_url: Option<&str>) -> Result<Url> {
        let raw = override_url.unwrap_or(&self.base_url);
        Url::parse(raw).with_context(|| format!("invalid API base URL: {raw}"))
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert_eq!(config.api.base_url, "http://localhost:8000/api/");
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        let config = AppConfig {
            api: ApiConfig {
                base_url: String::from("https://catalog.example.com/api/"),
                timeout_secs: 5,
            },
        };

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_partial_config() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api]\ntimeout_secs = 10\n").unwrap();

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config.api.base_url, "http://localhost:8000/api/");
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[api\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.unwrap_err().to_string().contains("failed to parse"));
    }

    #[test]
    fn test_resolve_base_url_override() {
        // Arrange
        let api = ApiConfig::default();

        // Act
        let default = api.resolve_base_url(None).unwrap();
        let overridden = api
            .resolve_base_url(Some("http://10.0.0.2:9000/api/"))
            .unwrap();

        // Assert
        assert_eq!(default.as_str(), "http://localhost:8000/api/");
        assert_eq!(overridden.as_str(), "http://10.0.0.2:9000/api/");
        assert!(api.resolve_base_url(Some("not a url")).is_err());
    }
}
