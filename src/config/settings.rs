//! TOML-based configuration for mdexec.
//!
//! Supports a config file (mdexec.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [platform]
//! endpoint = "https://secure.gooddata.com"
//! timeout_secs = 30
//!
//! [platform.headers]
//! X-GDC-AuthTT = "${MDEXEC_TEMPORARY_TOKEN}"
//!
//! [poll]
//! interval_ms = 500
//! max_attempts = 120
//!
//! [logging]
//! level = "info"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "MDEXEC_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Platform connection.
    pub platform: PlatformSettings,

    /// Result polling.
    pub poll: PollSettings,

    /// Log output.
    pub logging: LoggingSettings,
}

/// Platform connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PlatformSettings {
    /// Base URL that execution paths are resolved against (supports ${ENV_VAR} expansion).
    pub endpoint: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,

    /// Static headers sent with every request, e.g. an already established
    /// session token. Values support ${ENV_VAR} expansion.
    pub headers: BTreeMap<String, String>,
}

impl Default for PlatformSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://secure.gooddata.com".to_string(),
            timeout_secs: 30,
            headers: BTreeMap::new(),
        }
    }
}

impl PlatformSettings {
    /// Get the endpoint with environment variables expanded.
    pub fn resolved_endpoint(&self) -> Result<String, SettingsError> {
        expand_env_vars(&self.endpoint)
    }

    /// Get the headers with environment variables expanded in their values.
    pub fn resolved_headers(&self) -> Result<Vec<(String, String)>, SettingsError> {
        self.headers
            .iter()
            .map(|(name, value)| Ok((name.clone(), expand_env_vars(value)?)))
            .collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Polling of the tabular result handle while the platform answers 202.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PollSettings {
    /// Delay between attempts in milliseconds.
    pub interval_ms: u64,

    /// Total attempts, including the first one.
    pub max_attempts: u32,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: 500,
            max_attempts: 120,
        }
    }
}

impl PollSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive, e.g. "info" or "mdexec=debug". `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from TOML source.
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `MDEXEC_CONFIG`
    /// 2. `./mdexec.toml`
    /// 3. `~/.config/mdexec/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("mdexec.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("mdexec").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Reject settings the requester cannot work with.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.platform.endpoint.trim().is_empty() {
            return Err(SettingsError::InvalidConfig(
                "platform.endpoint must not be empty".to_string(),
            ));
        }
        if self.poll.max_attempts == 0 {
            return Err(SettingsError::InvalidConfig(
                "poll.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A lone `$` is kept as is.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let var_name: String = if chars.peek() == Some(&'{') {
            chars.next();
            let name: String = chars.by_ref().take_while(|&ch| ch != '}').collect();
            name
        } else {
            let mut name = String::new();
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                name.push(ch);
                chars.next();
            }
            if name.is_empty() {
                result.push('$');
                continue;
            }
            name
        };

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
