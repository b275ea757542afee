//! HTML rendering through minijinja.
//!
//! Theme templates are loaded from `<theme>/templates/<name><ext>`. Core
//! templates (the "unavailable" page) are compiled into the binary unless an
//! override directory is configured.

use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, ErrorKind};
use thiserror::Error;

use crate::config::UNAVAILABLE_TEMPLATE;
use crate::render::data::RenderData;
use crate::security::path::is_safe_name;

const BUILTIN_UNAVAILABLE: &str = include_str!("../../templates/templateUnavailable.tmpl");

/// Error type for template rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template {0:?} not found")]
    NotFound(String),

    #[error("rendering template {name:?} failed: {source}")]
    Template {
        name: String,
        #[source]
        source: minijinja::Error,
    },
}

/// Turns a template name and its data into HTML.
pub trait Renderer: Send + Sync {
    fn render(&self, name: &str, data: &RenderData) -> Result<String, RenderError>;
}

#[derive(Debug, Clone)]
struct TemplateDir {
    root: PathBuf,
    extension: String,
}

/// minijinja backed renderer.
pub struct TemplateRenderer {
    env: Environment<'static>,
    dir: Option<TemplateDir>,
    reload: bool,
}

impl TemplateRenderer {
    /// Renderer over `root`, resolving `name` to `root/name+extension`.
    ///
    /// With `reload` set every render starts from a fresh environment so
    /// edits on disk show up without a restart.
    pub fn from_dir(root: impl Into<PathBuf>, extension: impl Into<String>, reload: bool) -> Self {
        let dir = TemplateDir {
            root: root.into(),
            extension: extension.into(),
        };
        Self {
            env: dir_environment(&dir),
            dir: Some(dir),
            reload,
        }
    }

    /// Renderer holding the built-in core templates.
    pub fn builtin() -> Self {
        let mut env = base_environment();
        if let Err(e) = env.add_template(UNAVAILABLE_TEMPLATE, BUILTIN_UNAVAILABLE) {
            tracing::error!(error = %e, "Built-in template failed to compile");
        }
        Self {
            env,
            dir: None,
            reload: false,
        }
    }

    /// Core renderer: `override_dir` if configured, else the built-ins.
    pub fn core(override_dir: Option<&Path>, extension: &str) -> Self {
        match override_dir {
            Some(dir) => Self::from_dir(dir, extension, false),
            None => Self::builtin(),
        }
    }

    fn render_with(env: &Environment<'_>, name: &str, data: &RenderData) -> Result<String, RenderError> {
        let template = env.get_template(name).map_err(|e| match e.kind() {
            ErrorKind::TemplateNotFound => RenderError::NotFound(name.to_string()),
            _ => RenderError::Template {
                name: name.to_string(),
                source: e,
            },
        })?;

        template.render(data).map_err(|source| RenderError::Template {
            name: name.to_string(),
            source,
        })
    }
}

impl Renderer for TemplateRenderer {
    fn render(&self, name: &str, data: &RenderData) -> Result<String, RenderError> {
        match (&self.dir, self.reload) {
            (Some(dir), true) => Self::render_with(&dir_environment(dir), name, data),
            _ => Self::render_with(&self.env, name, data),
        }
    }
}

fn base_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env
}

fn dir_environment(dir: &TemplateDir) -> Environment<'static> {
    let mut env = base_environment();
    let dir = dir.clone();
    env.set_loader(move |name| {
        if !is_safe_name(name) {
            return Ok(None);
        }
        let path = dir.root.join(format!("{}{}", name, dir.extension));
        match std::fs::read_to_string(&path) {
            Ok(source) => Ok(Some(source)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(minijinja::Error::new(
                ErrorKind::InvalidOperation,
                format!("could not read template {}", path.display()),
            )
            .with_source(e)),
        }
    });
    env
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(title: &str) -> RenderData {
        let mut data = RenderData::new();
        data.insert("title", title);
        data.insert("BaseURI", "http://example.com/");
        data
    }

    #[test]
    fn test_render_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("post.tmpl"),
            "<h1>{{ title }}</h1><a href=\"{{ BaseURI }}\">home</a>",
        )
        .unwrap();

        let renderer = TemplateRenderer::from_dir(dir.path(), ".tmpl", false);
        let html = renderer.render("post", &data("Hi & bye")).unwrap();
        assert!(html.starts_with("<h1>Hi &amp; bye</h1>"));
        assert!(html.contains("example.com"));
    }

    #[test]
    fn test_nested_names_and_includes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("posts")).unwrap();
        std::fs::write(dir.path().join("layout.tmpl"), "[{% block body %}{% endblock %}]").unwrap();
        std::fs::write(
            dir.path().join("posts/hello.tmpl"),
            "{% extends \"layout\" %}{% block body %}{{ title }}{% endblock %}",
        )
        .unwrap();

        let renderer = TemplateRenderer::from_dir(dir.path(), ".tmpl", false);
        assert_eq!(renderer.render("posts/hello", &data("x")).unwrap(), "[x]");
    }

    #[test]
    fn test_reload_picks_up_edits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.tmpl");
        std::fs::write(&path, "one").unwrap();

        let renderer = TemplateRenderer::from_dir(dir.path(), ".tmpl", true);
        assert_eq!(renderer.render("page", &RenderData::new()).unwrap(), "one");

        std::fs::write(&path, "two").unwrap();
        assert_eq!(renderer.render("page", &RenderData::new()).unwrap(), "two");
    }

    #[test]
    fn test_missing_template() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = TemplateRenderer::from_dir(dir.path(), ".tmpl", false);
        let err = renderer.render("nope", &RenderData::new()).unwrap_err();
        assert!(matches!(err, RenderError::NotFound(name) if name == "nope"));
    }

    #[test]
    fn test_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.tmpl"), "{% if %}").unwrap();
        let renderer = TemplateRenderer::from_dir(dir.path(), ".tmpl", false);
        let err = renderer.render("bad", &RenderData::new()).unwrap_err();
        assert!(matches!(err, RenderError::Template { .. }));
    }

    #[test]
    fn test_builtin_unavailable() {
        let renderer = TemplateRenderer::builtin();
        let html = renderer.render(UNAVAILABLE_TEMPLATE, &RenderData::new()).unwrap();
        assert!(html.contains("Template unavailable"));
    }
}
