//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/pdf-outlines/outlines.toml`
//! 3. Explicit config file passed to [`Settings::load`]
//! 4. Environment variables: `OUTLINES__*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// Highest object number a conforming reader is required to handle.
pub const DEFAULT_MAX_OBJECT_NUMBER: u32 = 8_388_607;

/// Resource limits applied while resolving and allocating objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Allocation fails once the next object number would exceed this
    pub max_object_number: u32,
    /// Chains of indirect references longer than this resolve to nothing
    pub max_reference_depth: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_object_number: DEFAULT_MAX_OBJECT_NUMBER,
            max_reference_depth: 32,
        }
    }
}

/// Raw limits for intermediate parsing (Option to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawLimitsConfig {
    pub max_object_number: Option<u32>,
    pub max_reference_depth: Option<usize>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub log_filter: Option<String>,
    #[serde(default)]
    pub limits: RawLimitsConfig,
}

impl LimitsConfig {
    /// Overlay wins where it specifies a value.
    pub fn merge(&self, overlay: &RawLimitsConfig) -> Self {
        Self {
            max_object_number: overlay
                .max_object_number
                .unwrap_or(self.max_object_number),
            max_reference_depth: overlay
                .max_reference_depth
                .unwrap_or(self.max_reference_depth),
        }
    }
}

/// Unified configuration for pdf-outlines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// `tracing` filter directive used when logging is initialised (default: "warn")
    pub log_filter: String,
    /// Resolution and allocation limits
    pub limits: LimitsConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_filter: "warn".into(),
            limits: LimitsConfig::default(),
        }
    }
}

/// Get the XDG config directory for pdf-outlines.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "pdf-outlines").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("outlines.toml"))
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

impl Settings {
    /// Merge overlay config onto self (base). Overlay wins if Some.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            log_filter: overlay
                .log_filter
                .clone()
                .unwrap_or_else(|| self.log_filter.clone()),
            limits: self.limits.merge(&overlay.limits),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file, applied over the global one
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/pdf-outlines/outlines.toml`
    /// 3. `config_file`, which must exist when given
    /// 4. Environment variables: `OUTLINES__*`
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current)
    }

    /// Apply OUTLINES__* environment variables as explicit overrides.
    ///
    /// Nested keys use a double underscore: `OUTLINES__LIMITS__MAX_OBJECT_NUMBER=1000`.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("OUTLINES").prefix_separator("__").separator("__"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("log_filter") {
            settings.log_filter = val;
        }
        if let Ok(val) = config.get::<u32>("limits.max_object_number") {
            settings.limits.max_object_number = val;
        }
        if let Ok(val) = config.get::<usize>("limits.max_reference_depth") {
            settings.limits.max_reference_depth = val;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# pdf-outlines configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/pdf-outlines/outlines.toml
#   Explicit: file passed to Settings::load
#   Env:      OUTLINES__* environment variables (e.g. OUTLINES__LIMITS__MAX_OBJECT_NUMBER)

# tracing filter directive
# log_filter = "warn"

[limits]
# Allocation of new object identities fails past this object number
# max_object_number = 8388607

# Longer chains of indirect references resolve to nothing
# max_reference_depth = 32
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
