//! Chromium sessions over the DevTools protocol.
//!
//! # Responsibilities
//! - Translate `BrowserOptions` into a chromiumoxide launch
//! - Drive the CDP event handler on a background task
//! - Close the browser and reap the child process on teardown

use std::time::Duration;

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures_util::StreamExt;
use tokio::task::JoinHandle;
use url::Url;

use crate::config::BrowserOptions;
use crate::error::{SmokeError, SmokeResult};
use crate::ui::session::{BrowserLauncher, PageSession};

/// Launches local Chromium processes.
#[derive(Debug, Clone)]
pub struct ChromeLauncher {
    options: BrowserOptions,
}

impl ChromeLauncher {
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }

    fn browser_config(&self) -> SmokeResult<BrowserConfig> {
        // Headless mode is passed as an explicit switch, so keep chromiumoxide's own flag off.
        let mut builder = BrowserConfig::builder()
            .with_head()
            .request_timeout(Duration::from_secs(self.options.request_timeout_secs))
            .args(self.options.launch_args());

        if let Some(executable) = &self.options.executable {
            builder = builder.chrome_executable(executable);
        }

        builder
            .build()
            .map_err(|e| SmokeError::Browser(format!("invalid browser configuration: {}", e)))
    }
}

impl BrowserLauncher for ChromeLauncher {
    type Session = ChromeSession;

    async fn launch(&self) -> SmokeResult<ChromeSession> {
        let config = self.browser_config()?;
        tracing::debug!(args = ?self.options.launch_args(), "Launching Chromium");

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SmokeError::Browser(format!("failed to launch Chromium: {}", e)))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    tracing::debug!(error = %e, "CDP handler error");
                }
            }
        });

        tracing::info!("Chromium launched");
        Ok(ChromeSession {
            browser,
            handler,
            page: None,
        })
    }
}

/// A running Chromium with at most one page.
pub struct ChromeSession {
    browser: Browser,
    handler: JoinHandle<()>,
    page: Option<Page>,
}

impl ChromeSession {
    fn page(&self) -> SmokeResult<&Page> {
        self.page
            .as_ref()
            .ok_or_else(|| SmokeError::Browser("no page has been opened".to_string()))
    }
}

impl PageSession for ChromeSession {
    async fn open(&mut self, url: &Url) -> SmokeResult<()> {
        let page = self
            .browser
            .new_page(url.as_str())
            .await
            .map_err(|e| SmokeError::Browser(format!("navigation to {} failed: {}", url, e)))?;
        self.page = Some(page);
        Ok(())
    }

    async fn title(&mut self) -> SmokeResult<String> {
        let title = self
            .page()?
            .get_title()
            .await
            .map_err(|e| SmokeError::Browser(format!("reading title failed: {}", e)))?;
        Ok(title.unwrap_or_default())
    }

    async fn count_elements(&mut self, selector: &str) -> SmokeResult<usize> {
        let elements = self
            .page()?
            .find_elements(selector)
            .await
            .map_err(|e| SmokeError::Browser(format!("querying {:?} failed: {}", selector, e)))?;
        Ok(elements.len())
    }

    async fn close(mut self) -> SmokeResult<()> {
        self.page = None;
        let closed = self
            .browser
            .close()
            .await
            .map(|_| ())
            .map_err(|e| SmokeError::Browser(format!("closing Chromium failed: {}", e)));

        match self.browser.wait().await {
            Ok(status) => tracing::info!(exit_status = ?status, "Chromium exited"),
            Err(e) => tracing::warn!(error = %e, "Failed to reap Chromium process"),
        }
        closed
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
