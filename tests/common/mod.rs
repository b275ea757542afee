//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use tempfile::TempDir;
use theme_renderer::config::ThemeConfig;

/// A theme tree (`theme/templates`, `theme/data`, `public`) in a temp dir.
pub struct ThemeFixture {
    dir: TempDir,
}

impl ThemeFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        for sub in ["theme/templates", "theme/data", "public"] {
            fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn template(&self, name: &str, source: &str) -> &Self {
        write(self.root().join("theme/templates").join(format!("{}.tmpl", name)), source);
        self
    }

    pub fn data(&self, name: &str, json: &str) -> &Self {
        write(self.root().join("theme/data").join(format!("{}.json", name)), json);
        self
    }

    pub fn public(&self, name: &str, contents: &str) -> &Self {
        write(self.root().join("public").join(name), contents);
        self
    }

    pub fn config(&self, base_route: &str) -> ThemeConfig {
        let mut config = ThemeConfig::default();
        config.theme.directory = self.root().join("theme");
        config.theme.public_dir = self.root().join("public");
        config.theme.base_route = base_route.to_string();
        config.listener.address = "127.0.0.1".to_string();
        config.listener.port = 0;
        config
    }
}

fn write(path: PathBuf, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// GET request with a Host header.
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("Host", "example.com")
        .body(Body::empty())
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
