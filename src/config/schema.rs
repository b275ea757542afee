//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the renderer.
//! All types derive Serde traits for deserialization from config files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Name of the core template rendered when no theme template matches.
pub const UNAVAILABLE_TEMPLATE: &str = "templateUnavailable";

/// Root configuration for the theme renderer.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Theme selection and filesystem layout.
    pub theme: ThemeSettings,

    /// Listener configuration (bind address and port).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ThemeConfig {
    /// Directory holding the theme's templates.
    pub fn templates_dir(&self) -> PathBuf {
        self.theme.directory.join("templates")
    }

    /// Directory holding the per-template JSON sidecars.
    pub fn data_dir(&self) -> PathBuf {
        self.theme.directory.join("data")
    }

    /// Directory holding the public assets.
    pub fn public_dir(&self) -> &Path {
        &self.theme.public_dir
    }

    /// Base route as it appears in URLs (`""` or `"/blog"`).
    pub fn mount_path(&self) -> String {
        if self.theme.base_route.is_empty() {
            String::new()
        } else {
            format!("/{}", self.theme.base_route)
        }
    }
}

/// Theme configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// Theme root containing `templates/` and `data/`. Required.
    pub directory: PathBuf,

    /// Path segment every public URI is mounted under (without slashes).
    pub base_route: String,

    /// Root of the static public assets.
    pub public_dir: PathBuf,

    /// Suffix appended to template names on disk.
    pub template_extension: String,

    /// Optional directory overriding the built-in core templates.
    pub core_templates_dir: Option<PathBuf>,

    /// Re-read templates from disk on every render.
    pub reload_templates: bool,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::new(),
            base_route: String::new(),
            public_dir: PathBuf::from("public"),
            template_extension: ".tmpl".to_string(),
            core_templates_dir: None,
            reload_templates: true,
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Host or IP to bind; empty binds every interface.
    pub address: String,

    /// TCP port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        let host = if self.address.is_empty() {
            "0.0.0.0"
        } else {
            self.address.as_str()
        };
        format!("{}:{}", host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            address: String::new(),
            port: 8080,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human readable or JSON lines.
    pub log_format: LogFormat,

    /// Append logs to this file instead of stdout.
    pub log_file: Option<PathBuf>,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            log_file: None,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml() {
        let config: ThemeConfig = toml::from_str(
            r#"
            [theme]
            directory = "themes/plain"
            base_route = "blog"
            "#,
        )
        .unwrap();

        assert_eq!(config.theme.directory, PathBuf::from("themes/plain"));
        assert_eq!(config.templates_dir(), PathBuf::from("themes/plain/templates"));
        assert_eq!(config.data_dir(), PathBuf::from("themes/plain/data"));
        assert_eq!(config.mount_path(), "/blog");
        assert_eq!(config.theme.template_extension, ".tmpl");
        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.observability.log_format, LogFormat::Text);
    }

    #[test]
    fn test_bind_address() {
        let mut listener = ListenerConfig::default();
        assert_eq!(listener.bind_address(), "0.0.0.0:8080");

        listener.address = "127.0.0.1".into();
        listener.port = 3000;
        assert_eq!(listener.bind_address(), "127.0.0.1:3000");
    }

    #[test]
    fn test_log_format_json() {
        let config: ThemeConfig = toml::from_str(
            r#"
            [observability]
            log_format = "json"
            "#,
        )
        .unwrap();
        assert_eq!(config.observability.log_format, LogFormat::Json);
        assert_eq!(config.mount_path(), "");
    }
}
