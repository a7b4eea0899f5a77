//! Configuration loading for pushover-mcp
//!
//! Credentials are resolved per value:
//! 1. Environment variables `PUSHOVER_TOKEN` / `PUSHOVER_USER_KEY`
//! 2. Config file at `PUSHOVER_CONFIG_PATH`, or
//!    `$XDG_CONFIG_HOME/pushover-mcp/config.json` (default `~/.config`)
//!
//! A missing or unreadable file is not an error: the server still starts
//! and reports the missing credentials through its tools.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::types::PUSHOVER_API_BASE;

pub const TOKEN_ENV: &str = "PUSHOVER_TOKEN";
pub const USER_KEY_ENV: &str = "PUSHOVER_USER_KEY";
pub const CONFIG_PATH_ENV: &str = "PUSHOVER_CONFIG_PATH";
pub const API_URL_ENV: &str = "PUSHOVER_API_URL";

/// Resolved Pushover credentials
#[derive(Clone, PartialEq, Eq)]
pub struct PushoverConfig {
    /// Application API token
    pub token: String,
    /// User or group key receiving the notifications
    pub user_key: String,
    pub api_url: String,
    /// File consulted for fallback values, reported in error messages
    pub config_path: PathBuf,
}

/// On-disk config file contents, JSON or TOML
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub struct FileConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub user_key: String,
    #[serde(default)]
    pub api_url: Option<String>,
}

impl Default for PushoverConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            user_key: String::new(),
            api_url: PUSHOVER_API_BASE.to_string(),
            config_path: config_file_path(),
        }
    }
}

// Credentials stay out of logs
impl fmt::Debug for PushoverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PushoverConfig")
            .field("token", &redact(&self.token))
            .field("user_key", &redact(&self.user_key))
            .field("api_url", &self.api_url)
            .field("config_path", &self.config_path)
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

impl PushoverConfig {
    pub fn new(token: impl Into<String>, user_key: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_key: user_key.into(),
            ..Default::default()
        }
    }

    /// Point the client at a different API base (proxies, tests)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Both credentials are present
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty() && !self.user_key.is_empty()
    }

    /// Load from the process environment and the config file
    pub fn load() -> Self {
        Self::load_from(|key| std::env::var(key).ok())
    }

    /// Load using `env` as the variable lookup
    pub fn load_from<F>(env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|v| !v.is_empty());
        let config_path = config_file_path_from(&lookup);

        let mut token = lookup(TOKEN_ENV).unwrap_or_default();
        let mut user_key = lookup(USER_KEY_ENV).unwrap_or_default();
        let mut api_url = lookup(API_URL_ENV);

        if token.is_empty() || user_key.is_empty() || api_url.is_none() {
            let file = load_file(&config_path);
            if token.is_empty() {
                token = file.token;
            }
            if user_key.is_empty() {
                user_key = file.user_key;
            }
            if api_url.is_none() {
                api_url = file.api_url.filter(|v| !v.is_empty());
            }
        }

        let config = Self {
            token,
            user_key,
            api_url: api_url.unwrap_or_else(|| PUSHOVER_API_BASE.to_string()),
            config_path,
        };

        if config.is_valid() {
            tracing::info!("Pushover credentials loaded");
        } else {
            tracing::warn!(
                "Pushover credentials incomplete. Set {} and {} or create {}",
                TOKEN_ENV,
                USER_KEY_ENV,
                config.config_path.display()
            );
        }

        config
    }
}

/// Config file location from the process environment
pub fn config_file_path() -> PathBuf {
    config_file_path_from(&|key: &str| std::env::var(key).ok().filter(|v| !v.is_empty()))
}

fn config_file_path_from(env: &dyn Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(path) = env(CONFIG_PATH_ENV) {
        return PathBuf::from(path);
    }

    let config_home = env("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"));

    config_home.join("pushover-mcp").join("config.json")
}

/// Read a config file; `.toml` files are parsed as TOML, anything else as JSON
///
/// Missing, empty or malformed files yield an empty config.
pub fn load_file(path: &Path) -> FileConfig {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!("No config file at {}: {}", path.display(), e);
            return FileConfig::default();
        }
    };

    if content.trim().is_empty() {
        return FileConfig::default();
    }

    let is_toml = path.extension().is_some_and(|ext| ext == "toml");
    let parsed = if is_toml {
        toml::from_str::<FileConfig>(&content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str::<FileConfig>(&content).map_err(|e| e.to_string())
    };

    match parsed {
        Ok(config) => {
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            tracing::warn!("Failed to parse config {}: {}", path.display(), e);
            FileConfig::default()
        }
    }
}
