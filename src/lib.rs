//! Smoke checks for a Wazuh security dashboard.
//!
//! Two independent probes against a dashboard this crate does not own:
//! - `health`: poll `GET <base>/api/status` until it answers 200, 302 or 401
//! - `ui`: load the login page in headless Chromium and check a form rendered

pub mod config;
pub mod error;
pub mod health;
pub mod observability;
pub mod runner;
pub mod ui;

pub use config::SmokeConfig;
pub use error::{Mismatch, SmokeError, SmokeResult};
pub use health::check_health;
pub use runner::{run_checks, CheckKind, RunReport};
pub use ui::check_ui;
