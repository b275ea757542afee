//! Request resolution subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (scheme, host, path, X-Forwarded-*)
//!     → forwarded.rs (effective scheme, host, prefix, path)
//!     → base_uri.rs (scheme://host[/prefix])
//!     → template.rs (public file? template name? index fallback)
//!         → prober.rs (filesystem presence checks)
//!     → Return: ResolutionOutcome
//! ```
//!
//! # Design Decisions
//! - Stateless: every request is resolved from scratch
//! - Public files win over templates with the same name
//! - Probe failures read as "not found", never as request errors

pub mod base_uri;
pub mod forwarded;
pub mod prober;
pub mod template;

pub use base_uri::BaseUri;
pub use forwarded::RequestContext;
pub use prober::{FsProber, Prober};
pub use template::{ResolutionOutcome, TemplateLookup, TemplateResolver};
