//! Single-attempt liveness probing.
//!
//! # Responsibilities
//! - Issue one GET against the status endpoint
//! - Classify the result into an [`AttemptOutcome`]
//!
//! # Design Decisions
//! - Transport errors are retryable, never fatal
//! - Only a request that cannot be built at all is fatal
//! - Redirects are not followed by default so that a 302 is seen as a 302

use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::config::HealthCheckConfig;
use crate::error::{SmokeError, SmokeResult};

const USER_AGENT: &str = "dashboard-smoke-health-check";
const MAX_REDIRECTS: usize = 10;

/// Why an attempt did not prove liveness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    /// The endpoint answered with a status outside the accepted set.
    Status(u16),
    /// Connection refused, TLS failure, DNS failure and the like.
    Transport(String),
    /// No response within the per-request timeout.
    Timeout,
}

impl fmt::Display for RetryReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryReason::Status(code) => write!(f, "unexpected status {}", code),
            RetryReason::Transport(e) => write!(f, "transport error: {}", e),
            RetryReason::Timeout => write!(f, "request timed out"),
        }
    }
}

/// Result of a single probe attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The endpoint answered with an accepted status.
    Alive(u16),
    /// Worth trying again after the interval.
    Retry(RetryReason),
    /// Retrying cannot help.
    Fatal(String),
}

/// Map a status code onto an attempt outcome.
pub fn classify_status(status: u16, accepted: &[u16]) -> AttemptOutcome {
    if accepted.contains(&status) {
        AttemptOutcome::Alive(status)
    } else {
        AttemptOutcome::Retry(RetryReason::Status(status))
    }
}

/// One liveness attempt against some target.
pub trait StatusProbe {
    /// Human-readable target, used in logs and errors.
    fn target(&self) -> &str;

    /// Perform one attempt. Never fails; failures are encoded in the outcome.
    fn probe(&self) -> impl Future<Output = AttemptOutcome> + Send;
}

/// Probe backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpStatusProbe {
    client: Client,
    url: Url,
    accepted: Vec<u16>,
}

impl HttpStatusProbe {
    /// Build a probe for the configured status endpoint.
    pub fn new(config: &HealthCheckConfig) -> SmokeResult<Self> {
        let url = config.target_url().map_err(|e| SmokeError::ProbeFatal {
            url: format!("{}{}", config.base_url, config.path),
            message: e.to_string(),
        })?;

        let client = Client::builder()
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(if config.follow_redirects {
                Policy::limited(MAX_REDIRECTS)
            } else {
                Policy::none()
            })
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            url,
            accepted: config.accepted_statuses.clone(),
        })
    }
}

impl StatusProbe for HttpStatusProbe {
    fn target(&self) -> &str {
        self.url.as_str()
    }

    async fn probe(&self) -> AttemptOutcome {
        match self.client.get(self.url.clone()).send().await {
            Ok(response) => classify_status(response.status().as_u16(), &self.accepted),
            Err(e) if e.is_builder() => AttemptOutcome::Fatal(e.to_string()),
            Err(e) if e.is_timeout() => AttemptOutcome::Retry(RetryReason::Timeout),
            Err(e) => AttemptOutcome::Retry(RetryReason::Transport(e.to_string())),
        }
    }
}
