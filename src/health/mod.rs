//! Health polling subsystem.
//!
//! # Data Flow
//! ```text
//! HealthCheckConfig
//!     → probe.rs (one GET, classified into AttemptOutcome)
//!     → poller.rs (bounded loop: Alive → return, Retry → sleep, Fatal → abort)
//!     → PollReport or SmokeError::LivenessTimeout
//! ```
//!
//! # Design Decisions
//! - The probe is a trait so the loop can be driven without a network
//! - 200, 302 and 401 all count as "alive"; an auth wall still proves the API is up

pub mod poller;
pub mod probe;

pub use poller::{HealthPoller, PollPolicy, PollReport};
pub use probe::{classify_status, AttemptOutcome, HttpStatusProbe, RetryReason, StatusProbe};

use crate::config::HealthCheckConfig;
use crate::error::SmokeResult;

/// Poll the configured status endpoint over HTTP.
pub async fn check_health(config: &HealthCheckConfig) -> SmokeResult<PollReport> {
    let probe = HttpStatusProbe::new(config)?;
    HealthPoller::new(probe, PollPolicy::from_config(config))
        .run()
        .await
}
