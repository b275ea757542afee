//! Render context assembly from JSON sidecar files.
//!
//! # Responsibilities
//! - Load `<theme>/data/<template>.json` when present
//! - Inject `BaseURI` and `CanonicalURI` for the templates
//!
//! # Design Decisions
//! - A missing sidecar is normal and yields an empty context
//! - A malformed sidecar is discarded whole, logged, never fatal
//! - Injected keys overwrite anything the sidecar defines

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::security::path::is_safe_name;

pub const BASE_URI_KEY: &str = "BaseURI";
pub const CANONICAL_URI_KEY: &str = "CanonicalURI";

/// Key/value context handed to a template.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderData(Map<String, Value>);

impl RenderData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn base_uri(&self) -> Option<&str> {
        self.get(BASE_URI_KEY).and_then(Value::as_str)
    }

    pub fn canonical_uri(&self) -> Option<&str> {
        self.get(CANONICAL_URI_KEY).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for RenderData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Source of sidecar file contents.
pub trait DataLoader: Send + Sync {
    fn read(&self, path: &Path) -> io::Result<String>;
}

/// Reads sidecars from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsDataLoader;

impl DataLoader for FsDataLoader {
    fn read(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }
}

/// Builds `RenderData` for resolved templates.
#[derive(Clone)]
pub struct DataAssembler {
    loader: Arc<dyn DataLoader>,
    data_root: PathBuf,
}

impl DataAssembler {
    pub fn new(loader: Arc<dyn DataLoader>, data_root: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            data_root: data_root.into(),
        }
    }

    /// Sidecar contents for `data_file` merged with the computed URIs.
    pub fn assemble(
        &self,
        request_path: &str,
        data_file: &str,
        base_uri: &str,
        prefix: &str,
    ) -> RenderData {
        let mut data = self.load(data_file);

        data.insert(BASE_URI_KEY, format!("{}/", base_uri));

        let base_path = if prefix.is_empty() {
            String::new()
        } else {
            format!("/{}", prefix)
        };
        let relative = request_path
            .strip_prefix(base_path.as_str())
            .unwrap_or(request_path);
        data.insert(CANONICAL_URI_KEY, canonical_uri(base_uri, relative));

        data
    }

    fn load(&self, data_file: &str) -> RenderData {
        if !is_safe_name(data_file) {
            tracing::warn!(data_file = %data_file, "Refusing unsafe data file name");
            return RenderData::new();
        }

        let path = self.data_root.join(data_file);
        tracing::debug!(path = %path.display(), "Loading template data");

        let raw = match self.loader.read(&path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "No template data");
                return RenderData::new();
            }
        };

        match serde_json::from_str::<Map<String, Value>>(&raw) {
            Ok(map) => RenderData::from(map),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unmarshalling template data failed");
                RenderData::new()
            }
        }
    }
}

/// `base_uri + relative` with one trailing slash removed.
pub fn canonical_uri(base_uri: &str, relative: &str) -> String {
    let joined = format!("{}{}", base_uri, relative);
    match joined.strip_suffix('/') {
        Some(trimmed) => trimmed.to_string(),
        None => joined,
    }
}
