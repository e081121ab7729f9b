//! Configuration loading via `ortho-config`.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use serde::Deserialize;
use thiserror::Error;

use crate::python::Platform;

/// Settings for the `envpy` binary, merged from defaults, `envpy.toml`, and
/// `ENVPY_*` environment variables.
#[derive(Clone, Debug, Deserialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(
    prefix = "ENVPY",
    discovery(
        app_name = "envpy",
        env_var = "ENVPY_CONFIG_PATH",
        config_file_name = "envpy.toml",
        dotfile_name = ".envpy.toml",
        project_file_name = "envpy.toml"
    )
)]
pub struct EnvpyConfig {
    /// Interpreter path or installation prefix used by `find-python` when no
    /// path is passed on the command line.
    pub python: Option<String>,
    /// Layout override (`posix`, `macos` or `windows`). Defaults to the
    /// platform the binary was built for.
    pub layout: Option<String>,
}

impl EnvpyConfig {
    /// Loads configuration without attempting to parse CLI arguments. Values
    /// still merge defaults, configuration files, and environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] when the merge fails.
    pub fn load_without_cli_args() -> Result<Self, ConfigError> {
        Self::load_from_iter([std::ffi::OsString::from("envpy")]).map_err(ConfigError::from)
    }

    /// Rejects blank values and unknown layout names.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BlankField`] for a whitespace-only value and
    /// [`ConfigError::UnknownLayout`] for an unrecognised layout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::require_optional_value(self.python.as_deref(), "python")?;
        Self::require_optional_value(self.layout.as_deref(), "layout")?;
        self.platform().map(drop)
    }

    /// Returns the configured layout override, if any.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownLayout`] when the value is not a known
    /// layout name.
    pub fn platform(&self) -> Result<Option<Platform>, ConfigError> {
        self.layout
            .as_deref()
            .map(|value| {
                value.parse::<Platform>().map_err(|err| ConfigError::UnknownLayout {
                    value: err.value,
                })
            })
            .transpose()
    }

    fn require_optional_value(value: Option<&str>, field: &'static str) -> Result<(), ConfigError> {
        match value {
            Some(v) if v.trim().is_empty() => Err(ConfigError::BlankField { field }),
            _ => Ok(()),
        }
    }
}

/// Errors raised during configuration loading and validation.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    /// Surfaces errors from the `ortho-config` loader.
    #[error("configuration parsing failed: {0}")]
    Parse(String),
    /// Raised when a configured value is empty or only whitespace.
    #[error("{field} must not be blank: set ENVPY_{env_suffix} or add {field} to envpy.toml", env_suffix = field.to_uppercase())]
    BlankField {
        /// Configuration key that failed validation.
        field: &'static str,
    },
    /// Raised when the layout override is not a known platform.
    #[error("unknown layout `{value}`: set ENVPY_LAYOUT to posix, macos or windows")]
    UnknownLayout {
        /// Value found in configuration.
        value: String,
    },
}

impl From<Arc<OrthoError>> for ConfigError {
    fn from(value: Arc<OrthoError>) -> Self {
        Self::Parse(value.to_string())
    }
}
