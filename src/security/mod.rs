//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Request path
//!     → routing (template candidate name)
//!     → path.rs (refuse names escaping the theme or public roots)
//!     → Filesystem probes / reads
//! ```
//!
//! # Design Decisions
//! - Fail closed: an unsafe name resolves as "template missing"
//! - No trust in client input

pub mod path;
