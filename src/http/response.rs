//! Response helpers.
//!
//! # Responsibilities
//! - Redirect trailing-slash paths to their canonical form
//! - Map pipeline failures to status codes

use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

/// Target of the trailing-slash redirect for `uri`, if one applies.
///
/// One trailing slash is removed and leading slashes collapse to one, so the
/// target never reads as a protocol-relative URL. The query string is kept.
/// The site root `/` is left alone.
pub fn trailing_slash_target(uri: &Uri) -> Option<String> {
    let path = uri.path();
    if path.len() <= 1 || !path.ends_with('/') {
        return None;
    }

    let trimmed = path[..path.len() - 1].trim_start_matches('/');
    Some(match uri.query() {
        Some(query) => format!("/{}?{}", trimmed, query),
        None => format!("/{}", trimmed),
    })
}

/// `302 Found` pointing at `location`.
pub fn found(location: String) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(uri: &str) -> Option<String> {
        trailing_slash_target(&uri.parse().unwrap())
    }

    #[test]
    fn test_trailing_slash_target() {
        assert_eq!(target("/blog/"), Some("/blog".to_string()));
        assert_eq!(target("/blog/post/?page=2"), Some("/blog/post?page=2".to_string()));
        assert_eq!(target("/blog//"), Some("/blog/".to_string()));
        assert_eq!(target("//evil.example/"), Some("/evil.example".to_string()));
        assert_eq!(target("///evil.example/x/"), Some("/evil.example/x".to_string()));
        assert_eq!(target("//"), Some("/".to_string()));
        assert_eq!(target("/"), None);
        assert_eq!(target("/blog"), None);
    }

    #[test]
    fn test_found() {
        let response = found("/blog".to_string());
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/blog");
    }
}
