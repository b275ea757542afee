//! Externally visible base URL.

use crate::routing::forwarded::RequestContext;

/// Base URL of the mounted site plus the prefix it was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUri {
    /// `scheme://host[/prefix]`, no trailing slash added.
    pub uri: String,
    pub prefix: String,
}

impl BaseUri {
    pub fn build(context: &RequestContext) -> Self {
        let mut uri = format!("{}://{}", context.scheme, context.host);
        if !context.path_prefix.is_empty() {
            uri.push('/');
            uri.push_str(&context.path_prefix);
        }

        Self {
            uri,
            prefix: context.path_prefix.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(prefix: &str) -> RequestContext {
        RequestContext {
            scheme: "https".into(),
            host: "example.com".into(),
            path_prefix: prefix.into(),
            raw_path: "/".into(),
        }
    }

    #[test]
    fn test_without_prefix() {
        let base = BaseUri::build(&context(""));
        assert_eq!(base.uri, "https://example.com");
        assert_eq!(base.prefix, "");
    }

    #[test]
    fn test_with_prefix() {
        let base = BaseUri::build(&context("blog"));
        assert_eq!(base.uri, "https://example.com/blog");
        assert_eq!(base.prefix, "blog");
    }

    #[test]
    fn test_prefix_not_normalized() {
        let base = BaseUri::build(&context("/blog/"));
        assert_eq!(base.uri, "https://example.com//blog/");
    }
}
