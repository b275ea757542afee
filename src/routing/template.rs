//! Request path to template resolution.
//!
//! # Responsibilities
//! - Derive a template name from the request path and mount prefix
//! - Give public files precedence over same-named templates
//! - Fall back to `index` for the site root
//!
//! # Design Decisions
//! - An empty candidate is never a public file
//! - Names that could escape a root are refused before any probe
//! - Probes run through the `Prober` trait so resolution is testable

use std::path::PathBuf;
use std::sync::Arc;

use crate::routing::prober::Prober;
use crate::security::path::is_safe_name;

/// Template rendered for the site root.
pub const INDEX_TEMPLATE: &str = "index";

/// Where a request ends up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    PublicFile,
    TemplateFound(String),
    TemplateMissing,
}

/// Raw result of a template lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLookup {
    pub name: String,
    pub found: bool,
    pub public_file: bool,
}

impl TemplateLookup {
    pub fn outcome(&self) -> ResolutionOutcome {
        if self.public_file {
            ResolutionOutcome::PublicFile
        } else if self.found {
            ResolutionOutcome::TemplateFound(self.name.clone())
        } else {
            ResolutionOutcome::TemplateMissing
        }
    }
}

/// Maps request paths onto the public and template roots.
#[derive(Clone)]
pub struct TemplateResolver {
    prober: Arc<dyn Prober>,
    public_root: PathBuf,
    template_root: PathBuf,
    extension: String,
}

impl TemplateResolver {
    pub fn new(
        prober: Arc<dyn Prober>,
        public_root: impl Into<PathBuf>,
        template_root: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            prober,
            public_root: public_root.into(),
            template_root: template_root.into(),
            extension: extension.into(),
        }
    }

    /// Resolve `request_path` mounted under `prefix`.
    pub fn resolve(&self, request_path: &str, prefix: &str) -> TemplateLookup {
        let name = candidate_name(request_path, prefix);
        tracing::debug!(path = %request_path, prefix = %prefix, template = %name, "Template candidate");

        if name.is_empty() {
            let found = self
                .prober
                .exists(INDEX_TEMPLATE, &self.extension, &self.template_root);
            return TemplateLookup {
                name: INDEX_TEMPLATE.to_string(),
                found,
                public_file: false,
            };
        }

        if !is_safe_name(name) {
            tracing::warn!(template = %name, "Refusing unsafe template name");
            return TemplateLookup {
                name: name.to_string(),
                found: false,
                public_file: false,
            };
        }

        if self.prober.exists(name, "", &self.public_root) {
            return TemplateLookup {
                name: name.to_string(),
                found: false,
                public_file: true,
            };
        }

        let found = self.prober.exists(name, &self.extension, &self.template_root);
        TemplateLookup {
            name: name.to_string(),
            found,
            public_file: false,
        }
    }
}

/// Template name candidate for a path: mount prefix, one trailing slash and
/// one leading slash removed.
pub fn candidate_name<'a>(request_path: &'a str, prefix: &str) -> &'a str {
    let mount = format!("/{}", prefix);
    let name = request_path.strip_prefix(mount.as_str()).unwrap_or(request_path);
    let name = name.strip_suffix('/').unwrap_or(name);
    name.strip_prefix('/').unwrap_or(name)
}
