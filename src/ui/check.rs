//! Login page smoke check.
//!
//! # Responsibilities
//! - Acquire a browser session, load the dashboard, let it settle
//! - Snapshot the title and the number of input elements
//! - Release the session on every exit path, then judge the snapshot
//!
//! # Design Decisions
//! - One navigation attempt, no retries
//! - Both structural assertions are evaluated; all mismatches are reported together
//! - The title is only loosely compared with the product name

use std::time::Duration;

use serde::Serialize;
use tokio::time;
use url::Url;

use crate::config::UiCheckConfig;
use crate::error::{Mismatch, SmokeError, SmokeResult};
use crate::ui::session::{BrowserLauncher, PageSession};

/// What the rendered page looked like after settling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSnapshot {
    pub title: String,
    pub input_count: usize,
}

/// Loads the dashboard in a browser and checks that a login form rendered.
pub struct UiSmokeCheck<L> {
    launcher: L,
    url: String,
    settle: Duration,
    expected_title: String,
    input_selector: String,
    min_inputs: usize,
}

impl<L: BrowserLauncher> UiSmokeCheck<L> {
    pub fn new(launcher: L, config: &UiCheckConfig) -> Self {
        Self {
            launcher,
            url: config.url.clone(),
            settle: Duration::from_secs(config.settle_secs),
            expected_title: config.expected_title.clone(),
            input_selector: config.input_selector.clone(),
            min_inputs: config.min_inputs,
        }
    }

    /// Run the check end to end, returning the snapshot when it passes.
    pub async fn run(&self) -> SmokeResult<PageSnapshot> {
        let url = Url::parse(&self.url)
            .map_err(|e| SmokeError::Browser(format!("invalid dashboard URL {}: {}", self.url, e)))?;

        let mut session = self.launcher.launch().await?;
        let inspected = self.inspect(&mut session, &url).await;
        let closed = session.close().await;

        let snapshot = match (inspected, closed) {
            (Ok(snapshot), Ok(())) => snapshot,
            (Ok(_), Err(close_err)) => return Err(close_err),
            (Err(e), Ok(())) => return Err(e),
            (Err(e), Err(close_err)) => {
                tracing::warn!(error = %close_err, "Browser teardown failed after inspection error");
                return Err(e);
            }
        };

        self.verify(&snapshot)?;
        Ok(snapshot)
    }

    async fn inspect(&self, session: &mut L::Session, url: &Url) -> SmokeResult<PageSnapshot> {
        tracing::info!(url = %url, "Opening dashboard page");
        session.open(url).await?;

        time::sleep(self.settle).await;

        let title = session.title().await?;
        let input_count = session.count_elements(&self.input_selector).await?;
        tracing::debug!(title = %title, input_count, "Captured page snapshot");

        Ok(PageSnapshot { title, input_count })
    }

    /// Judge a snapshot against the structural expectations.
    pub fn verify(&self, snapshot: &PageSnapshot) -> SmokeResult<()> {
        let mut mismatches = Vec::new();

        let title = snapshot.title.trim();
        if title.is_empty() {
            mismatches.push(Mismatch::EmptyTitle);
        } else if title.contains(&self.expected_title) {
            tracing::info!(title = %title, "Page title names the product");
        } else {
            tracing::info!(
                title = %title,
                expected = %self.expected_title,
                "Page title does not name the product, accepting non-empty title"
            );
        }

        if snapshot.input_count < self.min_inputs {
            mismatches.push(Mismatch::TooFewInputs {
                found: snapshot.input_count,
                required: self.min_inputs,
            });
        }

        if mismatches.is_empty() {
            Ok(())
        } else {
            tracing::error!(?mismatches, "Dashboard page failed structural checks");
            Err(SmokeError::StructuralMismatch(mismatches))
        }
    }
}
