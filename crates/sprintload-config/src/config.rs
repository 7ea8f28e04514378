//! Configuration types and loading for the sprintload system.
//!
//! [`SprintloadConfig`] mirrors `.sprintload/config.yaml`. [`load_config`]
//! layers, lowest to highest priority:
//!
//! 1. built-in defaults
//! 2. `config.yaml`
//! 3. `SPRINTLOAD_*` environment variables, `__` separating nested keys
//!    (`SPRINTLOAD_TRACKER__BASE_URL`, `SPRINTLOAD_DEFAULT_PROJECT`)

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File name of the configuration inside `.sprintload/`.
pub const CONFIG_FILE: &str = "config.yaml";

/// Prefix of environment variables layered over the file.
pub const ENV_PREFIX: &str = "SPRINTLOAD_";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized to YAML.
    #[error("failed to write config file: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// The layered configuration did not produce a valid config.
    #[error("invalid configuration: {0}")]
    Extract(Box<figment::Error>),

    /// The `.sprintload/` directory was not found.
    #[error("no .sprintload directory found (run 'sprintload init' first)")]
    DirNotFound,
}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self::Extract(Box::new(e))
    }
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Issue tracker connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the tracker, e.g. `https://acme.atlassian.net`.
    #[serde(default)]
    pub base_url: String,

    /// Account e-mail used for basic auth.
    #[serde(default)]
    pub email: String,

    /// Name of the environment variable holding the API token.
    /// The token itself is never written to disk.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Items requested per page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            email: String::new(),
            token_env: default_token_env(),
            page_size: default_page_size(),
        }
    }
}

impl TrackerConfig {
    /// Returns `true` once a base URL is configured.
    pub fn is_configured(&self) -> bool {
        !self.base_url.trim().is_empty()
    }
}

fn default_token_env() -> String {
    "SPRINTLOAD_TOKEN".to_string()
}

fn default_page_size() -> u32 {
    50
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full configuration, corresponding to `.sprintload/config.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SprintloadConfig {
    /// Tracker connection.
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Project used when `--project` is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_project: Option<String>,

    /// Snapshot file used instead of the tracker when `--snapshot` is omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<String>,

    /// Directory reports are written to as `<sprint>.csv`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,
}

impl SprintloadConfig {
    /// Resolves `output_dir` against the project directory's parent.
    pub fn output_dir_in(&self, project_dir: &Path) -> Option<PathBuf> {
        let dir = self.output_dir.as_deref()?;
        let path = PathBuf::from(dir);
        if path.is_absolute() {
            return Some(path);
        }
        Some(project_dir.parent().unwrap_or(project_dir).join(path))
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load configuration from `config.yaml` inside the given `.sprintload/`
/// directory, layered with environment variables.
///
/// A missing or empty file contributes nothing.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
/// or [`ConfigError::Extract`] if the merged values do not form a valid config.
pub fn load_config(dir: &Path) -> Result<SprintloadConfig> {
    let mut figment = Figment::from(Serialized::defaults(SprintloadConfig::default()));

    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)?;
        if !content.trim().is_empty() {
            figment = figment.merge(Yaml::string(&content));
        }
    }

    let config = figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()?;
    Ok(config)
}

/// Save configuration to `config.yaml` inside the given `.sprintload/` directory.
///
/// The directory is created if it does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::ReadError`] on I/O failure or [`ConfigError::ParseError`]
/// if serialization fails.
pub fn save_config(dir: &Path, config: &SprintloadConfig) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(dir.join(CONFIG_FILE), yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
