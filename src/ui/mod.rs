//! Dashboard UI smoke check.
//!
//! # Data Flow
//! ```text
//! UiCheckConfig
//!     → chrome.rs (launch headless Chromium)
//!     → check.rs (navigate, settle, snapshot, close)
//!     → verify snapshot: non-empty title, enough inputs
//! ```

pub mod check;
pub mod chrome;
pub mod session;

pub use check::{PageSnapshot, UiSmokeCheck};
pub use chrome::{ChromeLauncher, ChromeSession};
pub use session::{BrowserLauncher, PageSession};

use crate::config::UiCheckConfig;
use crate::error::SmokeResult;

/// Load the dashboard in a local Chromium and check the login form rendered.
pub async fn check_ui(config: &UiCheckConfig) -> SmokeResult<PageSnapshot> {
    let launcher = ChromeLauncher::new(config.browser.clone());
    UiSmokeCheck::new(launcher, config).run().await
}
