//! Theme Renderer
//!
//! Serves a theme directory over HTTP: public assets as-is, templates
//! rendered with their JSON data sidecars.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                  THEME RENDERER                  │
//!                       │                                                  │
//!   Client Request      │  ┌─────────┐   ┌──────────────┐   ┌───────────┐  │
//!   ────────────────────┼─▶│  http   │──▶│ public files │──▶│  routing  │  │
//!                       │  │ server  │   │  (ServeDir)  │   │ resolver  │  │
//!                       │  └─────────┘   └──────────────┘   └─────┬─────┘  │
//!                       │                                         │        │
//!                       │                                         ▼        │
//!   Client Response     │  ┌─────────┐   ┌──────────────┐   ┌───────────┐  │
//!   ◀───────────────────┼──│  page   │◀──│   render     │◀──│   data    │  │
//!                       │  │         │   │  (minijinja) │   │ assembler │  │
//!                       │  └─────────┘   └──────────────┘   └───────────┘  │
//!                       │                                                  │
//!                       │  config · observability · lifecycle · security   │
//!                       └──────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use clap::Parser;

use theme_renderer::config::{load_config, Args};
use theme_renderer::lifecycle::{signals, startup, Shutdown};
use theme_renderer::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config_path, overrides) = Args::parse().into_parts()?;
    let config = load_config(config_path.as_deref(), overrides)?;

    logging::init(&config.observability)?;

    tracing::info!(
        theme = %config.theme.directory.display(),
        base_route = %config.theme.base_route,
        bind_address = %config.listener.bind_address(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Arc::new(Shutdown::new());
    signals::forward_to(shutdown.clone());

    startup::start(config, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
