//! Bounded liveness polling.
//!
//! # Responsibilities
//! - Run probe attempts one at a time up to a fixed budget
//! - Sleep a constant interval after every failed attempt
//! - Return on the first accepted status, or fail with a liveness timeout
//!
//! # Design Decisions
//! - No backoff: the interval is constant
//! - Each attempt is additionally bounded by `tokio::time::timeout`
//! - Retryable failures are logged and swallowed; only fatal ones abort early

use std::time::Duration;

use serde::Serialize;
use tokio::time::{self, Instant};

use crate::config::HealthCheckConfig;
use crate::error::{SmokeError, SmokeResult};
use crate::health::probe::{AttemptOutcome, RetryReason, StatusProbe};

/// Attempt budget and pacing for a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    pub attempts: u32,
    pub interval: Duration,
    pub request_timeout: Duration,
}

impl PollPolicy {
    pub fn from_config(config: &HealthCheckConfig) -> Self {
        Self {
            attempts: config.attempts,
            interval: Duration::from_secs(config.interval_secs),
            request_timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Upper bound on time spent sleeping before the poll gives up.
    pub fn sleep_budget(&self) -> Duration {
        self.interval.saturating_mul(self.attempts)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::from_config(&HealthCheckConfig::default())
    }
}

/// Summary of a successful poll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollReport {
    pub url: String,
    /// 1-based index of the attempt that succeeded.
    pub attempts: u32,
    pub status: u16,
    #[serde(rename = "elapsed_ms", serialize_with = "as_millis")]
    pub elapsed: Duration,
}

fn as_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Polls a [`StatusProbe`] until it reports liveness or the budget runs out.
pub struct HealthPoller<P> {
    probe: P,
    policy: PollPolicy,
}

impl<P: StatusProbe> HealthPoller<P> {
    pub fn new(probe: P, policy: PollPolicy) -> Self {
        Self { probe, policy }
    }

    pub async fn run(&self) -> SmokeResult<PollReport> {
        let url = self.probe.target().to_string();
        let started = Instant::now();

        tracing::info!(
            url = %url,
            attempts = self.policy.attempts,
            interval_secs = self.policy.interval.as_secs(),
            sleep_budget_secs = self.policy.sleep_budget().as_secs(),
            "Polling health endpoint"
        );

        for attempt in 1..=self.policy.attempts {
            let outcome = match time::timeout(self.policy.request_timeout, self.probe.probe()).await {
                Ok(outcome) => outcome,
                Err(_) => AttemptOutcome::Retry(RetryReason::Timeout),
            };

            match outcome {
                AttemptOutcome::Alive(status) => {
                    let elapsed = started.elapsed();
                    tracing::info!(
                        url = %url,
                        attempt,
                        status,
                        elapsed_ms = elapsed.as_millis() as u64,
                        "Health endpoint is alive"
                    );
                    return Ok(PollReport {
                        url,
                        attempts: attempt,
                        status,
                        elapsed,
                    });
                }
                AttemptOutcome::Retry(reason) => {
                    tracing::warn!(url = %url, attempt, reason = %reason, "Health probe failed, retrying");
                }
                AttemptOutcome::Fatal(message) => {
                    tracing::error!(url = %url, attempt, error = %message, "Health probe cannot be sent");
                    return Err(SmokeError::ProbeFatal { url, message });
                }
            }

            time::sleep(self.policy.interval).await;
        }

        tracing::error!(
            url = %url,
            attempts = self.policy.attempts,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Health endpoint never became reachable"
        );
        Err(SmokeError::LivenessTimeout {
            url,
            attempts: self.policy.attempts,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    /// Replays a scripted list of outcomes, then repeats the last one.
    struct ScriptedProbe {
        script: Vec<AttemptOutcome>,
        calls: Arc<AtomicU32>,
    }

    impl ScriptedProbe {
        fn new(script: Vec<AttemptOutcome>) -> (Self, Arc<AtomicU32>) {
            let calls = Arc::new(AtomicU32::new(0));
            (Self { script, calls: calls.clone() }, calls)
        }
    }

    impl StatusProbe for ScriptedProbe {
        fn target(&self) -> &str {
            "https://localhost/api/status"
        }

        async fn probe(&self) -> AttemptOutcome {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
            self.script
                .get(n)
                .or_else(|| self.script.last())
                .cloned()
                .unwrap_or(AttemptOutcome::Retry(RetryReason::Timeout))
        }
    }

    struct HangingProbe;

    impl StatusProbe for HangingProbe {
        fn target(&self) -> &str {
            "https://localhost/api/status"
        }

        async fn probe(&self) -> AttemptOutcome {
            std::future::pending().await
        }
    }

    fn refused() -> AttemptOutcome {
        AttemptOutcome::Retry(RetryReason::Transport("connection refused".into()))
    }

    #[tokio::test(start_paused = true)]
    async fn test_alive_on_first_attempt() {
        let (probe, calls) = ScriptedProbe::new(vec![AttemptOutcome::Alive(200)]);
        let poller = HealthPoller::new(probe, PollPolicy::default());

        let report = poller.run().await.unwrap();
        assert_eq!(report.attempts, 1);
        assert_eq!(report.status, 200);
        assert_eq!(report.elapsed, Duration::ZERO);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_early_exit_for_every_attempt_index() {
        for k in 1..=30u32 {
            let mut script = vec![refused(); (k - 1) as usize];
            script.push(AttemptOutcome::Alive(302));
            let (probe, calls) = ScriptedProbe::new(script);
            let poller = HealthPoller::new(probe, PollPolicy::default());

            let report = poller.run().await.unwrap();
            assert_eq!(report.attempts, k);
            assert_eq!(calls.load(Ordering::SeqCst), k, "probed past success at k={}", k);
            assert_eq!(report.elapsed, Duration::from_secs(5 * (k as u64 - 1)));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_auth_wall_on_last_attempt() {
        let mut script = vec![refused(); 29];
        script.push(AttemptOutcome::Alive(401));
        let (probe, calls) = ScriptedProbe::new(script);
        let poller = HealthPoller::new(probe, PollPolicy::default());

        let report = poller.run().await.unwrap();
        assert_eq!(report.attempts, 30);
        assert_eq!(report.status, 401);
        assert_eq!(calls.load(Ordering::SeqCst), 30);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unreachable_fails_after_full_budget() {
        let (probe, calls) = ScriptedProbe::new(vec![refused()]);
        let poller = HealthPoller::new(probe, PollPolicy::default());
        let started = Instant::now();

        let err = poller.run().await.unwrap_err();
        assert_eq!(calls.load(Ordering::SeqCst), 30);
        assert_eq!(started.elapsed(), Duration::from_secs(150));
        assert!(matches!(err, SmokeError::LivenessTimeout { attempts: 30, .. }));
        assert!(err
            .to_string()
            .starts_with("API health endpoint not reachable in time"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_accepted_status_keeps_polling() {
        let (probe, calls) = ScriptedProbe::new(vec![
            AttemptOutcome::Retry(RetryReason::Status(503)),
            AttemptOutcome::Retry(RetryReason::Status(502)),
            AttemptOutcome::Alive(200),
        ]);
        let poller = HealthPoller::new(probe, PollPolicy::default());

        let report = poller.run().await.unwrap();
        assert_eq!(report.attempts, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fatal_outcome_aborts_immediately() {
        let (probe, calls) = ScriptedProbe::new(vec![
            refused(),
            AttemptOutcome::Fatal("relative URL without a base".into()),
            AttemptOutcome::Alive(200),
        ]);
        let poller = HealthPoller::new(probe, PollPolicy::default());

        let err = poller.run().await.unwrap_err();
        assert!(matches!(err, SmokeError::ProbeFatal { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_probe_is_cut_by_request_timeout() {
        let policy = PollPolicy {
            attempts: 3,
            interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(5),
        };
        let poller = HealthPoller::new(HangingProbe, policy);
        let started = Instant::now();

        let err = poller.run().await.unwrap_err();
        assert!(matches!(err, SmokeError::LivenessTimeout { attempts: 3, .. }));
        assert_eq!(started.elapsed(), Duration::from_secs(30));
    }

    #[test]
    fn test_default_policy_budget() {
        let policy = PollPolicy::default();
        assert_eq!(policy.attempts, 30);
        assert_eq!(policy.sleep_budget(), Duration::from_secs(150));
    }
}
