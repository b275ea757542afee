//! Command line and environment configuration sources.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{ConfigError, ConfigOverrides};

/// Theme-driven HTTP content renderer.
#[derive(Debug, Parser)]
#[command(name = "theme-renderer", version, about, long_about = None)]
pub struct Args {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "THEME_RENDERER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Theme directory containing `templates/` and `data/`.
    #[arg(long, env = "GO_THEME")]
    pub theme: Option<PathBuf>,

    /// Path segment all public URIs are mounted under.
    #[arg(long, env = "GOBASEROUTE")]
    pub base_route: Option<String>,

    /// Directory of static public assets.
    #[arg(long)]
    pub public_dir: Option<PathBuf>,

    /// Address to listen on.
    #[arg(long, env = "SERVER_ADDR")]
    pub addr: Option<String>,

    /// Port to listen on.
    #[arg(short, long, env = "PORT")]
    pub port: Option<String>,

    /// Append logs to this file.
    #[arg(long, env = "GO_LOGFILE")]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Split into the config file path and the values overriding it.
    ///
    /// Empty values (`PORT=""`, `GO_LOGFILE=""`) count as unset.
    pub fn into_parts(self) -> Result<(Option<PathBuf>, ConfigOverrides), ConfigError> {
        let port = match non_empty(self.port) {
            Some(value) => Some(
                value
                    .parse::<u16>()
                    .map_err(|source| ConfigError::InvalidPort { value, source })?,
            ),
            None => None,
        };

        let overrides = ConfigOverrides {
            theme: non_empty_path(self.theme),
            base_route: non_empty(self.base_route),
            public_dir: non_empty_path(self.public_dir),
            address: non_empty(self.addr),
            port,
            log_file: non_empty_path(self.log_file),
            log_level: non_empty(self.log_level),
        };
        Ok((non_empty_path(self.config), overrides))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn non_empty_path(value: Option<PathBuf>) -> Option<PathBuf> {
    value.filter(|p| !p.as_os_str().is_empty())
}
