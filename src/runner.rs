//! Runs the selected checks and collects a report.

use std::fmt;
use std::time::Instant;

use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::SmokeConfig;
use crate::error::SmokeResult;
use crate::{health, ui};

/// Which smoke check a report entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    Health,
    Ui,
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::Health => write!(f, "health"),
            CheckKind::Ui => write!(f, "ui"),
        }
    }
}

/// Outcome of one check.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub check: CheckKind,
    pub passed: bool,
    pub detail: String,
    pub elapsed_ms: u64,
}

impl CheckReport {
    fn from_result<T>(
        check: CheckKind,
        started: Instant,
        result: SmokeResult<T>,
        describe: impl FnOnce(&T) -> String,
    ) -> Self {
        let elapsed_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(value) => Self {
                check,
                passed: true,
                detail: describe(&value),
                elapsed_ms,
            },
            Err(e) => Self {
                check,
                passed: false,
                detail: e.to_string(),
                elapsed_ms,
            },
        }
    }
}

/// All check outcomes of one invocation.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub checks: Vec<CheckReport>,
}

impl RunReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "run {}", self.run_id)?;
        for check in &self.checks {
            writeln!(
                f,
                "  [{}] {:<6} {} ({} ms)",
                if check.passed { "PASS" } else { "FAIL" },
                check.check,
                check.detail,
                check.elapsed_ms
            )?;
        }
        Ok(())
    }
}

/// Run `kinds` in order, one at a time.
pub async fn run_checks(config: &SmokeConfig, kinds: &[CheckKind]) -> RunReport {
    let run_id = Uuid::new_v4();
    let span = tracing::info_span!("smoke_run", run_id = %run_id);

    async move {
        let mut checks = Vec::with_capacity(kinds.len());
        for &kind in kinds {
            let started = Instant::now();
            let report = match kind {
                CheckKind::Health => {
                    let result = health::check_health(&config.health).await;
                    CheckReport::from_result(kind, started, result, |r| {
                        format!("{} answered {} on attempt {}", r.url, r.status, r.attempts)
                    })
                }
                CheckKind::Ui => {
                    let result = ui::check_ui(&config.ui).await;
                    CheckReport::from_result(kind, started, result, |s| {
                        format!("title {:?}, {} input elements", s.title, s.input_count)
                    })
                }
            };
            tracing::info!(check = %kind, passed = report.passed, "Check finished");
            checks.push(report);
        }
        RunReport { run_id, checks }
    }
    .instrument(span)
    .await
}
