//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! optional config file (TOML)
//!     → loader.rs (parse & deserialize, fall back to defaults)
//!     → WAZUH_URL environment override
//!     → validation.rs (semantic checks)
//!     → SmokeConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - All fields have defaults so the checks run with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::BrowserOptions;
pub use schema::HealthCheckConfig;
pub use schema::ObservabilityConfig;
pub use schema::SmokeConfig;
pub use schema::UiCheckConfig;
