//! Rendering subsystem.
//!
//! # Data Flow
//! ```text
//! ResolutionOutcome
//!     → dispatch.rs (pick terminal state)
//!     → data.rs (sidecar JSON + BaseURI/CanonicalURI, templates only)
//!     → engine.rs (minijinja: theme templates or core "unavailable" view)
//!     → Page (status + HTML)
//! ```
//!
//! # Design Decisions
//! - Renderers and data loaders are traits so the pipeline runs on fakes
//! - Every failure maps to a status code; nothing propagates to the server

pub mod data;
pub mod dispatch;
pub mod engine;

pub use data::{DataAssembler, DataLoader, FsDataLoader, RenderData};
pub use dispatch::{Dispatch, Page, RenderPipeline};
pub use engine::{RenderError, Renderer, TemplateRenderer};
