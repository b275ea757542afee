//! Filesystem presence checks.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Answers whether `folder/name+extension` exists.
pub trait Prober: Send + Sync {
    fn exists(&self, name: &str, extension: &str, folder: &Path) -> bool;
}

/// Path probed for a name, extension and folder.
pub fn probe_path(name: &str, extension: &str, folder: &Path) -> PathBuf {
    folder.join(format!("{}{}", name, extension))
}

/// Prober backed by `std::fs::metadata`.
///
/// Every error, not just "not found", reads as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProber;

impl Prober for FsProber {
    fn exists(&self, name: &str, extension: &str, folder: &Path) -> bool {
        let path = probe_path(name, extension, folder);
        match std::fs::metadata(&path) {
            Ok(_) => {
                tracing::debug!(path = %path.display(), "File exists");
                true
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "File not found");
                false
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "File probe failed, treating as missing");
                false
            }
        }
    }
}
