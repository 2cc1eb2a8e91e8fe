//! Configuration management
//!
//! Settings live in `~/.docreview/config.toml` and can be overridden from the
//! environment:
//!
//! | variable              | setting              |
//! |-----------------------|----------------------|
//! | `DOCREVIEW_API_URL`   | `api.base_url`       |
//! | `DOCREVIEW_TIMEOUT`   | `api.timeout_secs`   |
//! | `DOCREVIEW_REVISION`  | `api.revision`       |
//! | `DOCREVIEW_GUARD`     | `router.guard`       |
//! | `DOCREVIEW_DEV_MODE`  | `router.dev_mode`    |

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{ApiConfig, ApiRevision, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::paths;
use crate::router::{GuardMode, Router};

/// Errors raised while loading or saving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("config I/O failed for {}: {source}", path.display())]
    Io {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid TOML for [`AppConfig`]
    #[error("invalid config file {}: {source}", path.display())]
    Parse {
        /// Config file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },
    /// The config could not be rendered as TOML
    #[error("could not serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    /// A setting holds an unusable value
    #[error("invalid value '{value}' for {setting}: {reason}")]
    Invalid {
        /// Setting or environment variable name
        setting: String,
        /// Offending value
        value: String,
        /// Why it was rejected
        reason: String,
    },
}

/// docreview configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection
    #[serde(default)]
    pub api: ApiSettings,
    /// Step guards
    #[serde(default)]
    pub router: RouterSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Prefix for every endpoint
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Endpoint layout spoken by the backend
    #[serde(default)]
    pub revision: ApiRevision,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            revision: ApiRevision::default(),
        }
    }
}

/// Step guard settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Where guards read identifiers from
    #[serde(default)]
    pub guard: GuardMode,
    /// Disable guards entirely
    #[serde(default)]
    pub dev_mode: bool,
}

impl AppConfig {
    /// Load from `explicit` (or the default location) and apply environment
    /// overrides
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = explicit.map_or_else(paths::config_file, Path::to_path_buf);
        let mut config = Self::load_from(&path)?;
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load from a file, or defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to a file, creating its directory
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `DOCREVIEW_*` overrides read through `lookup`
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup("DOCREVIEW_API_URL").filter(|v| !v.is_empty()) {
            self.api.base_url = url;
        }
        if let Some(raw) = lookup("DOCREVIEW_TIMEOUT") {
            self.api.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                setting: "DOCREVIEW_TIMEOUT".to_string(),
                value: raw.clone(),
                reason: "expected whole seconds".to_string(),
            })?;
        }
        if let Some(raw) = lookup("DOCREVIEW_REVISION") {
            self.api.revision = raw.parse().map_err(|reason| ConfigError::Invalid {
                setting: "DOCREVIEW_REVISION".to_string(),
                value: raw.clone(),
                reason,
            })?;
        }
        if let Some(raw) = lookup("DOCREVIEW_GUARD") {
            self.router.guard = raw.parse().map_err(|reason| ConfigError::Invalid {
                setting: "DOCREVIEW_GUARD".to_string(),
                value: raw.clone(),
                reason,
            })?;
        }
        if let Some(raw) = lookup("DOCREVIEW_DEV_MODE") {
            self.router.dev_mode = parse_flag(&raw).ok_or_else(|| ConfigError::Invalid {
                setting: "DOCREVIEW_DEV_MODE".to_string(),
                value: raw.clone(),
                reason: "expected true or false".to_string(),
            })?;
        }
        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                setting: "api.timeout_secs".to_string(),
                value: "0".to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://")
        {
            return Err(ConfigError::Invalid {
                setting: "api.base_url".to_string(),
                value: self.api.base_url.clone(),
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }
        Ok(())
    }

    /// Connection settings for [`crate::api::ApiClient`]
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api.base_url.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
            revision: self.api.revision,
        }
    }

    /// Router with the configured guards
    #[must_use]
    pub const fn router(&self) -> Router {
        Router::new(self.router.guard, self.router.dev_mode)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
