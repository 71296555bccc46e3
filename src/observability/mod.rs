//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! health / ui / runner
//!     → tracing events with structured fields (url, attempt, status, error)
//!     → logging.rs (EnvFilter + fmt or JSON layer on stderr)
//! ```
//!
//! # Design Decisions
//! - Every CLI run is wrapped in a span carrying its run id

pub mod logging;

pub use logging::init_logging;
