//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config PATH`, else `$XDG_CONFIG_HOME/axislbl/axislbl.toml`
//! 3. Environment variables: `AXISLBL_*` prefix
//! 4. Command-line arguments (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, TickFormat, DEFAULT_PATTERN, DEFAULT_SEPARATOR};

/// Prefix of environment variables overriding settings.
pub const ENV_PREFIX: &str = "AXISLBL";

/// Unified configuration for axislbl.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Format pattern when none is given on the command line (default: "%g")
    pub format: String,
    /// Text written after each label (default: a single space)
    pub separator: String,
    /// Upper bound on tick intervals per plan, unlimited when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_ticks: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: DEFAULT_PATTERN.to_string(),
            separator: DEFAULT_SEPARATOR.to_string(),
            max_ticks: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub format: Option<String>,
    pub separator: Option<String>,
    pub max_ticks: Option<u64>,
}

/// Get the XDG config directory for axislbl.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "axislbl").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("axislbl.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}` in a user-supplied path.
pub fn expand_path(path: &Path) -> Result<PathBuf, ApplicationError> {
    let raw = path.to_string_lossy();
    shellexpand::full(raw.as_ref())
        .map(|expanded| PathBuf::from(expanded.as_ref()))
        .map_err(|e| ApplicationError::Config {
            message: format!("expand {}: {}", raw, e),
        })
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_path` - Explicit config file; must exist if given. Without it
    ///   the global config file is read when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ApplicationError> {
        let file = match config_path {
            Some(path) => Some(expand_path(path)?),
            None => global_config_path().filter(|path| path.exists()),
        };
        Self::load_from(file.as_deref(), environment())
    }

    /// Load settings from an optional file plus an environment source.
    pub fn load_from(file: Option<&Path>, env: Environment) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        if let Some(path) = file {
            debug!("loading config file {}", path.display());
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        // 3. Environment variables
        current = Self::apply_env_overrides(current, env)?;

        current.validate()?;
        Ok(current)
    }

    /// Scalar options: overlay wins if Some, otherwise keep base.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            format: overlay
                .format
                .clone()
                .unwrap_or_else(|| self.format.clone()),
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            max_ticks: overlay.max_ticks.or(self.max_ticks),
        }
    }

    /// Apply environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = optional(config.get_string("format"))? {
            settings.format = val;
        }
        if let Some(val) = optional(config.get_string("separator"))? {
            settings.separator = val;
        }
        if let Some(val) = optional(config.get_int("max_ticks"))? {
            let limit = u64::try_from(val).map_err(|_| ApplicationError::Config {
                message: format!("max_ticks must not be negative, got {}", val),
            })?;
            settings.max_ticks = Some(limit);
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.max_ticks == Some(0) {
            return Err(ApplicationError::Config {
                message: "max_ticks must be at least 1".to_string(),
            });
        }
        TickFormat::parse(&self.format).map_err(|e| ApplicationError::Config {
            message: format!("format: {}", e),
        })?;
        Ok(())
    }
}

/// `AXISLBL_FORMAT`, `AXISLBL_SEPARATOR` and `AXISLBL_MAX_TICKS`.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}

/// Missing keys are not an error; malformed values are.
fn optional<T>(result: Result<T, ConfigError>) -> Result<Option<T>, ApplicationError> {
    match result {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}
