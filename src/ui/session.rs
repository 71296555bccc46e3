//! Browser session abstraction.
//!
//! The check talks to these traits rather than to chromiumoxide directly, so the
//! acquire/inspect/release sequence can be exercised without a browser.

use std::future::Future;

use url::Url;

use crate::error::SmokeResult;

/// Starts a browser and hands back a session owning it.
pub trait BrowserLauncher {
    type Session: PageSession;

    fn launch(&self) -> impl Future<Output = SmokeResult<Self::Session>> + Send;
}

/// A live browser with one page.
///
/// `close` takes `self`, so a session can be torn down at most once.
pub trait PageSession: Send {
    /// Navigate the page and wait for the load to finish.
    fn open(&mut self, url: &Url) -> impl Future<Output = SmokeResult<()>> + Send;

    /// Current `document.title`, empty if the page has none.
    fn title(&mut self) -> impl Future<Output = SmokeResult<String>> + Send;

    /// Number of elements matching a CSS selector.
    fn count_elements(&mut self, selector: &str) -> impl Future<Output = SmokeResult<usize>> + Send;

    /// Shut the browser down and reap its process.
    fn close(self) -> impl Future<Output = SmokeResult<()>> + Send;
}
