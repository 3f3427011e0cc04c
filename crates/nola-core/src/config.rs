//! Application configuration management.
//!
//! This module handles loading and saving the client configuration: the API
//! base URL, the image base URL, the storage encryption secret, the request
//! timeout and the last used username.
//!
//! Configuration is stored at `~/.config/nola-admin/config.json` and can be
//! overridden from the environment (`NOLA_BASE_URL`, `NOLA_IMG_BASE_URL`,
//! `NOLA_ENCRYPTION_KEY`, `NOLA_TIMEOUT_SECS`).

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::utils::resolve_url;

/// Application name used for config/data/cache directory paths
const APP_NAME: &str = "nola-admin";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Request timeout bounds in seconds.
const MIN_TIMEOUT_SECS: u64 = 5;
const MAX_TIMEOUT_SECS: u64 = 10;

pub const ENV_BASE_URL: &str = "NOLA_BASE_URL";
pub const ENV_IMG_BASE_URL: &str = "NOLA_IMG_BASE_URL";
pub const ENV_ENCRYPTION_KEY: &str = "NOLA_ENCRYPTION_KEY";
pub const ENV_TIMEOUT_SECS: &str = "NOLA_TIMEOUT_SECS";

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api_base_url: String,
    pub img_base_url: Option<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub encryption_secret: String,
    pub request_timeout_secs: u64,
    pub last_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            img_base_url: None,
            encryption_secret: String::new(),
            request_timeout_secs: MAX_TIMEOUT_SECS,
            last_username: None,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_base_url", &self.api_base_url)
            .field("img_base_url", &self.img_base_url)
            .field("encryption_secret", &"<redacted>")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("last_username", &self.last_username)
            .finish()
    }
}

impl Config {
    /// Load the config file, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load only the config file, without environment overrides.
    pub fn load_file() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            let config = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))?;
            debug!(path = %path.display(), "Loaded config");
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Record the last username in the config file.
    ///
    /// Works on the file contents alone so environment overrides (notably
    /// the secret) are never written to disk.
    pub fn remember_username(username: &str) -> Result<()> {
        let mut file_config = Self::load_file()?;
        file_config.last_username = Some(username.to_string());
        file_config.save()
    }

    /// Apply overrides from `lookup` (normally the process environment).
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.api_base_url = url;
        }
        if let Some(url) = lookup(ENV_IMG_BASE_URL).filter(|v| !v.is_empty()) {
            self.img_base_url = Some(url);
        }
        if let Some(secret) = lookup(ENV_ENCRYPTION_KEY).filter(|v| !v.is_empty()) {
            self.encryption_secret = secret;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            match raw.trim().parse() {
                Ok(secs) => self.request_timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_base_url.is_empty() {
            bail!("API base URL is not configured (set {})", ENV_BASE_URL);
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            bail!("API base URL must start with http:// or https://");
        }
        if self.encryption_secret.is_empty() {
            bail!("Encryption secret is not configured (set {})", ENV_ENCRYPTION_KEY);
        }
        Ok(())
    }

    /// Request timeout, kept within 5-10 seconds.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .clamp(MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS),
        )
    }

    /// Resolve a possibly relative URL returned by the API
    pub fn real_url(&self, url: &str) -> String {
        resolve_url(&self.api_base_url, url)
    }

    /// Resolve an image URL, preferring the image base URL when set
    pub fn image_url(&self, url: &str) -> String {
        let base = self.img_base_url.as_deref().unwrap_or(&self.api_base_url);
        resolve_url(base, url)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding encrypted client state
    pub fn data_dir(&self) -> Result<PathBuf> {
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME))
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config {
            api_base_url: "http://file.example".to_string(),
            ..Config::default()
        };
        config.apply_env(env(&[
            (ENV_BASE_URL, "https://blog.example/"),
            (ENV_ENCRYPTION_KEY, "s3cret"),
            (ENV_TIMEOUT_SECS, "7"),
        ]));

        assert_eq!(config.api_base_url, "https://blog.example/");
        assert_eq!(config.encryption_secret, "s3cret");
        assert_eq!(config.request_timeout(), Duration::from_secs(7));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let mut config = Config::default();
        config.apply_env(env(&[(ENV_TIMEOUT_SECS, "soon")]));
        assert_eq!(config.request_timeout_secs, MAX_TIMEOUT_SECS);
    }

    #[test]
    fn test_timeout_is_clamped() {
        let mut config = Config::default();
        config.request_timeout_secs = 1;
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        config.request_timeout_secs = 60;
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_err());

        config.api_base_url = "ftp://blog.example".to_string();
        config.encryption_secret = "s3cret".to_string();
        assert!(config.validate().is_err());

        config.api_base_url = "https://blog.example".to_string();
        assert!(config.validate().is_ok());

        config.encryption_secret.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_without_secret() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config {
            api_base_url: "https://blog.example".to_string(),
            last_username: Some("admin".to_string()),
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("encryption_secret"));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_image_url_prefers_image_base() {
        let mut config = Config {
            api_base_url: "https://api.example".to_string(),
            ..Config::default()
        };
        assert_eq!(config.image_url("/upload/a.png"), "https://api.example/upload/a.png");

        config.img_base_url = Some("https://img.example".to_string());
        assert_eq!(config.image_url("/upload/a.png"), "https://img.example/upload/a.png");
        assert_eq!(config.real_url("/upload/a.png"), "https://api.example/upload/a.png");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = Config {
            encryption_secret: "hunter2".to_string(),
            ..Config::default()
        };
        assert!(!format!("{:?}", config).contains("hunter2"));
    }
}
