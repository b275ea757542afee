//! Theme-driven HTTP content renderer library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod render;
pub mod routing;
pub mod security;

pub use config::ThemeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use render::RenderPipeline;
