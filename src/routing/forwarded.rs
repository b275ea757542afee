//! Effective request coordinates behind a reverse proxy.
//!
//! # Responsibilities
//! - Read scheme, host, mount prefix and path from the request
//! - Let non-empty `X-Forwarded-*` headers override each of them
//!
//! # Design Decisions
//! - Absent or empty headers are the normal case, never an error
//! - The configured base route is the default prefix

use axum::http::{header, HeaderMap, Request};

pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const X_FORWARDED_PREFIX: &str = "x-forwarded-prefix";
pub const X_FORWARDED_PATH: &str = "x-forwarded-path";

/// Scheme, host, prefix and path of a request as seen by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub scheme: String,
    pub host: String,
    pub path_prefix: String,
    /// Resolved for completeness; the render pipeline keys off the URI path.
    pub raw_path: String,
}

impl RequestContext {
    /// Resolve the context of `request`, falling back to `configured_prefix`.
    pub fn resolve<B>(request: &Request<B>, configured_prefix: &str) -> Self {
        let uri = request.uri();
        let headers = request.headers();

        let native_scheme = uri.scheme_str().unwrap_or("http");
        let native_host = headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .or_else(|| uri.authority().map(|a| a.to_string()))
            .unwrap_or_default();

        let context = Self {
            scheme: forwarded(headers, X_FORWARDED_PROTO).unwrap_or(native_scheme).to_string(),
            host: forwarded(headers, X_FORWARDED_HOST)
                .map(str::to_string)
                .unwrap_or(native_host),
            path_prefix: forwarded(headers, X_FORWARDED_PREFIX)
                .unwrap_or(configured_prefix)
                .to_string(),
            raw_path: forwarded(headers, X_FORWARDED_PATH)
                .unwrap_or(uri.path())
                .to_string(),
        };

        tracing::debug!(
            scheme = %context.scheme,
            host = %context.host,
            prefix = %context.path_prefix,
            path = %context.raw_path,
            "Resolved request context"
        );

        context
    }
}

/// Non-empty value of a forwarding header.
fn forwarded<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_native_values() {
        let req = Request::builder()
            .uri("/blog/post-1")
            .header("Host", "example.com")
            .body(Body::empty())
            .unwrap();

        let ctx = RequestContext::resolve(&req, "blog");
        assert_eq!(ctx.scheme, "http");
        assert_eq!(ctx.host, "example.com");
        assert_eq!(ctx.path_prefix, "blog");
        assert_eq!(ctx.raw_path, "/blog/post-1");
    }

    #[test]
    fn test_absolute_uri_scheme_and_authority() {
        let req = Request::builder()
            .uri("https://secure.example.com/about")
            .body(Body::empty())
            .unwrap();

        let ctx = RequestContext::resolve(&req, "");
        assert_eq!(ctx.scheme, "https");
        assert_eq!(ctx.host, "secure.example.com");
        assert_eq!(ctx.path_prefix, "");
    }

    #[test]
    fn test_forwarded_headers_take_precedence() {
        let req = Request::builder()
            .uri("/about")
            .header("Host", "internal:8080")
            .header("X-Forwarded-Proto", "https")
            .header("X-Forwarded-Host", "www.example.com")
            .header("X-Forwarded-Prefix", "site")
            .header("X-Forwarded-Path", "/site/about")
            .body(Body::empty())
            .unwrap();

        let ctx = RequestContext::resolve(&req, "blog");
        assert_eq!(ctx.scheme, "https");
        assert_eq!(ctx.host, "www.example.com");
        assert_eq!(ctx.path_prefix, "site");
        assert_eq!(ctx.raw_path, "/site/about");
    }

    #[test]
    fn test_empty_forwarded_headers_ignored() {
        let req = Request::builder()
            .uri("/about")
            .header("Host", "example.com")
            .header("X-Forwarded-Proto", "")
            .header("X-Forwarded-Host", "")
            .header("X-Forwarded-Prefix", "")
            .header("X-Forwarded-Path", "")
            .body(Body::empty())
            .unwrap();

        let ctx = RequestContext::resolve(&req, "blog");
        assert_eq!(ctx.scheme, "http");
        assert_eq!(ctx.host, "example.com");
        assert_eq!(ctx.path_prefix, "blog");
        assert_eq!(ctx.raw_path, "/about");
    }
}
