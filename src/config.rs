//! Handler configuration, read from TOML.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::consts::{DEFAULT_ALLOW_ORIGIN, DEFAULT_MAX_RANGE_SPAN};

/// Configuration for [`crate::api::LeapYearApi`].
///
/// Every field has a default, so an empty document is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Value of the `Access-Control-Allow-Origin` header on every response.
    pub allow_origin: String,

    /// Largest number of years a single range request may cover.
    pub max_range_span: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            allow_origin:   DEFAULT_ALLOW_ORIGIN.to_string(),
            max_range_span: DEFAULT_MAX_RANGE_SPAN,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Io {
        path:   PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config")]
    Parse(#[from] toml::de::Error),

    #[error("max_range_span must be at least 1")]
    ZeroRangeSpan,
}

impl ApiConfig {
    /// Parses a config from a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` on malformed TOML or unknown keys, and
    /// `ConfigError::ZeroRangeSpan` if `max_range_span` is 0.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise the
    /// errors of [`ApiConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&toml_str)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_range_span == 0 {
            return Err(ConfigError::ZeroRangeSpan);
        }
        Ok(())
    }
}
