//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the render handler
//! - Wire up middleware (panic recovery, request ID, tracing, timeout,
//!   public files)
//! - Redirect trailing-slash paths
//! - Run the render pipeline off the async workers
//! - Serve until shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ThemeConfig;
use crate::http::request::{request_id, request_id_header, MakeRequestUuid};
use crate::http::response::{found, trailing_slash_target};
use crate::http::static_files::{public_files, PublicFiles};
use crate::observability::metrics;
use crate::render::{Page, RenderPipeline};
use crate::routing::RequestContext;

/// Error type for running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ThemeConfig>,
    pub pipeline: Arc<RenderPipeline>,
}

/// HTTP server for the theme renderer.
pub struct HttpServer {
    router: Router,
    config: Arc<ThemeConfig>,
}

impl HttpServer {
    /// Create a server rendering from the filesystem described by `config`.
    pub fn new(config: ThemeConfig) -> Self {
        let pipeline = RenderPipeline::from_config(&config);
        Self::with_pipeline(config, pipeline)
    }

    /// Create a server around an already built pipeline.
    pub fn with_pipeline(config: ThemeConfig, pipeline: RenderPipeline) -> Self {
        let config = Arc::new(config);
        let state = AppState {
            config: config.clone(),
            pipeline: Arc::new(pipeline),
        };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ThemeConfig, state: AppState) -> Router {
        let public = PublicFiles::new(config.mount_path(), config.public_dir());

        Router::new()
            .fallback(render_handler)
            .with_state(state)
            .layer(middleware::from_fn_with_state(public, public_files))
            .layer(
                ServiceBuilder::new()
                    .layer(CatchPanicLayer::new())
                    .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                        tracing::info_span!(
                            "request",
                            method = %request.method(),
                            uri = %request.uri(),
                            request_id = %request_id(request),
                        )
                    }))
                    .layer(PropagateRequestIdLayer::new(request_id_header()))
                    .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs))),
            )
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            theme = %self.config.theme.directory.display(),
            base_route = %self.config.theme.base_route,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ThemeConfig {
        &self.config
    }
}

/// Main render handler.
/// Redirects trailing slashes, then resolves and renders the request.
/// Resolution and `CanonicalURI` use the URI path only; the query string is
/// never part of a template name or canonical URL.
async fn render_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();

    if let Some(location) = trailing_slash_target(request.uri()) {
        tracing::debug!(location = %location, "Redirecting trailing slash");
        metrics::record_request("redirect", StatusCode::FOUND.as_u16(), start_time);
        return found(location);
    }

    let context = RequestContext::resolve(&request, &state.config.theme.base_route);
    let path = request.uri().path().to_string();
    let pipeline = state.pipeline.clone();

    // Existence checks, sidecar reads and rendering are blocking filesystem work.
    let page = match tokio::task::spawn_blocking(move || pipeline.handle(&context, &path)).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(error = %e, "Render task failed");
            Page {
                outcome: "error",
                status: StatusCode::INTERNAL_SERVER_ERROR,
                html: Some("Internal Server Error".to_string()),
            }
        }
    };

    metrics::record_request(page.outcome, page.status.as_u16(), start_time);
    page.into_response()
}
