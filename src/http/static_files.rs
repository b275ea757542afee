//! Public asset interception.
//!
//! Runs in front of the render handler. GET and HEAD requests under the
//! mount path are offered to `ServeDir`; anything it cannot serve falls
//! through to template resolution.

use std::path::Path;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{Method, StatusCode, Uri},
    middleware::Next,
    response::Response,
};
use tower::ServiceExt;
use tower_http::services::ServeDir;

/// The public asset root mounted under the base route.
#[derive(Clone, Debug)]
pub struct PublicFiles {
    mount: String,
    dir: ServeDir,
}

impl PublicFiles {
    /// `mount` is `""` or `"/<base route>"`.
    pub fn new(mount: impl Into<String>, root: &Path) -> Self {
        Self {
            mount: mount.into(),
            dir: ServeDir::new(root).append_index_html_on_directories(false),
        }
    }

    /// Path below the mount, or `None` if `path` is outside it.
    pub fn strip_mount<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.mount.as_str())?;
        if rest.is_empty() || rest.starts_with('/') {
            Some(rest)
        } else {
            None
        }
    }

    fn asset_uri(&self, uri: &Uri) -> Option<Uri> {
        let relative = self.strip_mount(uri.path())?;
        if relative.is_empty() || relative == "/" {
            return None;
        }
        let target = match uri.query() {
            Some(query) => format!("{}?{}", relative, query),
            None => relative.to_string(),
        };
        target.parse().ok()
    }
}

/// Middleware serving public assets before template resolution.
pub async fn public_files(
    State(files): State<PublicFiles>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() != Method::GET && request.method() != Method::HEAD {
        return next.run(request).await;
    }

    let Some(uri) = files.asset_uri(request.uri()) else {
        return next.run(request).await;
    };

    let mut probe = Request::new(Body::empty());
    *probe.method_mut() = request.method().clone();
    *probe.uri_mut() = uri;
    *probe.headers_mut() = request.headers().clone();

    match files.dir.clone().oneshot(probe).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => {
            tracing::debug!(path = %request.uri().path(), status = %response.status(), "Served public file");
            response.map(Body::new)
        }
        _ => next.run(request).await,
    }
}
