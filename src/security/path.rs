//! Path traversal guard for names derived from request paths.
//!
//! Template and data file names come straight from the URL, so they are
//! checked before being joined onto any filesystem root.

use std::path::{Component, Path};

/// Returns true if `name` stays inside whatever root it is joined onto.
///
/// Rejects `..` segments, absolute paths, drive prefixes, backslashes and
/// NUL bytes. Nested names such as `posts/2024/hello` are allowed.
pub fn is_safe_name(name: &str) -> bool {
    if name.is_empty() || name.contains('\\') || name.contains('\0') {
        return false;
    }

    Path::new(name)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}
