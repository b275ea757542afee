//! Terminal action selection and rendering.
//!
//! # States
//! ```text
//! Start ─┬─ PublicFile      → ServedAsPublic       (no render, 200)
//!        ├─ TemplateMissing → RenderedUnavailable  (core view, 503)
//!        └─ TemplateFound   → RenderedTemplate     (theme view, 200)
//! ```

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::config::{ThemeConfig, UNAVAILABLE_TEMPLATE};
use crate::render::data::{DataAssembler, FsDataLoader, RenderData};
use crate::render::engine::{Renderer, TemplateRenderer};
use crate::routing::{BaseUri, FsProber, RequestContext, ResolutionOutcome, TemplateResolver};

/// The one terminal state a request reaches.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    ServedAsPublic,
    RenderedUnavailable,
    RenderedTemplate { name: String, data: RenderData },
}

impl Dispatch {
    /// Metric/log label.
    pub fn label(&self) -> &'static str {
        match self {
            Dispatch::ServedAsPublic => "public",
            Dispatch::RenderedUnavailable => "unavailable",
            Dispatch::RenderedTemplate { .. } => "template",
        }
    }
}

/// A rendered response body with its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub outcome: &'static str,
    pub status: StatusCode,
    pub html: Option<String>,
}

impl IntoResponse for Page {
    fn into_response(self) -> Response {
        match self.html {
            Some(html) => (self.status, Html(html)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Resolution, data assembly and rendering for one request at a time.
#[derive(Clone)]
pub struct RenderPipeline {
    resolver: TemplateResolver,
    assembler: DataAssembler,
    theme: Arc<dyn Renderer>,
    core: Arc<dyn Renderer>,
    data_extension: String,
}

impl RenderPipeline {
    pub fn new(
        resolver: TemplateResolver,
        assembler: DataAssembler,
        theme: Arc<dyn Renderer>,
        core: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            resolver,
            assembler,
            theme,
            core,
            data_extension: ".json".to_string(),
        }
    }

    /// Pipeline over the real filesystem and minijinja.
    pub fn from_config(config: &ThemeConfig) -> Self {
        let settings = &config.theme;
        let resolver = TemplateResolver::new(
            Arc::new(FsProber),
            config.public_dir(),
            config.templates_dir(),
            settings.template_extension.clone(),
        );
        let assembler = DataAssembler::new(Arc::new(FsDataLoader), config.data_dir());
        let theme = TemplateRenderer::from_dir(
            config.templates_dir(),
            settings.template_extension.clone(),
            settings.reload_templates,
        );
        let core = TemplateRenderer::core(
            settings.core_templates_dir.as_deref(),
            &settings.template_extension,
        );

        Self::new(resolver, assembler, Arc::new(theme), Arc::new(core))
    }

    /// Decide the terminal state for `request_path`.
    pub fn dispatch(&self, context: &RequestContext, request_path: &str) -> Dispatch {
        let base = BaseUri::build(context);
        let lookup = self.resolver.resolve(request_path, &base.prefix);

        match lookup.outcome() {
            ResolutionOutcome::PublicFile => {
                tracing::debug!(path = %request_path, "Public file");
                Dispatch::ServedAsPublic
            }
            ResolutionOutcome::TemplateMissing => {
                tracing::info!(path = %request_path, template = %lookup.name, "Template unavailable");
                Dispatch::RenderedUnavailable
            }
            ResolutionOutcome::TemplateFound(name) => {
                let data_file = format!("{}{}", name, self.data_extension);
                let data = self
                    .assembler
                    .assemble(request_path, &data_file, &base.uri, &base.prefix);
                Dispatch::RenderedTemplate { name, data }
            }
        }
    }

    /// Carry out a dispatch decision.
    pub fn render(&self, dispatch: Dispatch) -> Page {
        let outcome = dispatch.label();
        match dispatch {
            Dispatch::ServedAsPublic => Page {
                outcome,
                status: StatusCode::OK,
                html: None,
            },
            Dispatch::RenderedUnavailable => {
                let html = self
                    .core
                    .render(UNAVAILABLE_TEMPLATE, &RenderData::new())
                    .unwrap_or_else(|e| {
                        tracing::error!(error = %e, "Core template failed");
                        "Template unavailable".to_string()
                    });
                Page {
                    outcome,
                    status: StatusCode::SERVICE_UNAVAILABLE,
                    html: Some(html),
                }
            }
            Dispatch::RenderedTemplate { name, data } => match self.theme.render(&name, &data) {
                Ok(html) => Page {
                    outcome,
                    status: StatusCode::OK,
                    html: Some(html),
                },
                Err(e) => {
                    tracing::error!(template = %name, error = %e, "Template render failed");
                    Page {
                        outcome: "error",
                        status: StatusCode::INTERNAL_SERVER_ERROR,
                        html: Some("Internal Server Error".to_string()),
                    }
                }
            },
        }
    }

    pub fn handle(&self, context: &RequestContext, request_path: &str) -> Page {
        self.render(self.dispatch(context, request_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::data::DataLoader;
    use crate::render::engine::RenderError;
    use crate::routing::template::tests::FakeProber;
    use serde_json::json;
    use std::io;
    use std::path::Path;
    use std::sync::Mutex;

    struct FakeLoader(Option<&'static str>);

    impl DataLoader for FakeLoader {
        fn read(&self, _path: &Path) -> io::Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
        }
    }

    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(String, RenderData)>>,
        fail: bool,
    }

    impl Renderer for RecordingRenderer {
        fn render(&self, name: &str, data: &RenderData) -> Result<String, RenderError> {
            self.calls.lock().unwrap().push((name.to_string(), data.clone()));
            if self.fail {
                return Err(RenderError::NotFound(name.to_string()));
            }
            Ok(format!("<{}>", name))
        }
    }

    struct Fixture {
        pipeline: RenderPipeline,
        theme: Arc<RecordingRenderer>,
        core: Arc<RecordingRenderer>,
    }

    fn fixture(files: &[&str], sidecar: Option<&'static str>, theme_fails: bool) -> Fixture {
        let resolver = TemplateResolver::new(
            Arc::new(FakeProber::with_files(files)),
            "public",
            "theme/templates",
            ".tmpl",
        );
        let assembler = DataAssembler::new(Arc::new(FakeLoader(sidecar)), "theme/data");
        let theme = Arc::new(RecordingRenderer {
            fail: theme_fails,
            ..Default::default()
        });
        let core = Arc::new(RecordingRenderer::default());
        Fixture {
            pipeline: RenderPipeline::new(resolver, assembler, theme.clone(), core.clone()),
            theme,
            core,
        }
    }

    fn context(prefix: &str) -> RequestContext {
        RequestContext {
            scheme: "http".into(),
            host: "example.com".into(),
            path_prefix: prefix.into(),
            raw_path: String::new(),
        }
    }

    #[test]
    fn test_template_rendered_with_data() {
        let f = fixture(&["theme/templates/post-1.tmpl"], Some(r#"{"title":"Hi"}"#), false);
        let dispatch = f.pipeline.dispatch(&context("blog"), "/blog/post-1");

        let Dispatch::RenderedTemplate { name, data } = &dispatch else {
            panic!("expected a template, got {:?}", dispatch);
        };
        assert_eq!(name, "post-1");
        assert_eq!(
            serde_json::to_value(data).unwrap(),
            json!({
                "title": "Hi",
                "BaseURI": "http://example.com/blog/",
                "CanonicalURI": "http://example.com/blog/post-1",
            })
        );

        let page = f.pipeline.render(dispatch);
        assert_eq!(page.status, StatusCode::OK);
        assert_eq!(page.html.as_deref(), Some("<post-1>"));
        assert_eq!(f.theme.calls.lock().unwrap().len(), 1);
        assert!(f.core.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_missing_template_renders_unavailable() {
        let f = fixture(&[], None, false);
        let page = f.pipeline.handle(&context(""), "/missing");

        assert_eq!(page.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(page.outcome, "unavailable");
        let calls = f.core.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, UNAVAILABLE_TEMPLATE);
        assert!(f.theme.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_public_file_renders_nothing() {
        let f = fixture(&["public/styles.css"], None, false);
        let page = f.pipeline.handle(&context(""), "/styles.css");

        assert_eq!(page.outcome, "public");
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.html.is_none());
        assert!(f.theme.calls.lock().unwrap().is_empty());
        assert!(f.core.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_malformed_sidecar_still_renders() {
        let f = fixture(&["theme/templates/about.tmpl"], Some("{not json"), false);
        let page = f.pipeline.handle(&context(""), "/about");

        assert_eq!(page.status, StatusCode::OK);
        let calls = f.theme.calls.lock().unwrap();
        assert_eq!(calls[0].1.base_uri(), Some("http://example.com/"));
        assert_eq!(calls[0].1.canonical_uri(), Some("http://example.com/about"));
    }

    #[test]
    fn test_render_failure_is_500() {
        let f = fixture(&["theme/templates/about.tmpl"], None, true);
        let page = f.pipeline.handle(&context(""), "/about");

        assert_eq!(page.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(page.outcome, "error");
    }
}
