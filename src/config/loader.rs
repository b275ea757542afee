//! Configuration loading from disk and the process environment.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::ThemeConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid port {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Values that take precedence over the config file.
///
/// Populated from command line flags and environment variables; `None`
/// leaves the file (or default) value in place.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub theme: Option<PathBuf>,
    pub base_route: Option<String>,
    pub public_dir: Option<PathBuf>,
    pub address: Option<String>,
    pub port: Option<u16>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// Apply every set override onto `config`.
    pub fn apply(self, config: &mut ThemeConfig) {
        if let Some(theme) = self.theme {
            config.theme.directory = theme;
        }
        if let Some(base_route) = self.base_route {
            config.theme.base_route = base_route;
        }
        if let Some(public_dir) = self.public_dir {
            config.theme.public_dir = public_dir;
        }
        if let Some(address) = self.address {
            config.listener.address = address;
        }
        if let Some(port) = self.port {
            config.listener.port = port;
        }
        if let Some(log_file) = self.log_file {
            config.observability.log_file = Some(log_file);
        }
        if let Some(log_level) = self.log_level {
            config.observability.log_level = log_level;
        }
    }
}

/// Parse a TOML file into a configuration without validating it.
pub fn read_config(path: &Path) -> Result<ThemeConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Build the process configuration: optional file, then overrides, then
/// normalization and validation.
pub fn load_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<ThemeConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => ThemeConfig::default(),
    };

    overrides.apply(&mut config);
    config.theme.base_route = config.theme.base_route.trim_matches('/').to_string();

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}
