// src/runner/mod.rs
use crate::checks::CheckTarget;
use crate::report::{CheckOutcome, CheckStatus};
use std::time::Duration;
use tokio::task::JoinError;
use tokio::time::{timeout, Instant};
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Executes a set of check targets concurrently, each under its own deadline,
/// and collects exactly one outcome per target in configuration order.
pub struct CheckRunner {
    default_timeout: Duration,
}

impl CheckRunner {
    pub fn new(default_timeout: Duration) -> Self {
        Self { default_timeout }
    }

    pub async fn run(&self, targets: &[CheckTarget]) -> Vec<CheckOutcome> {
        let mut handles = Vec::with_capacity(targets.len());

        for target in targets {
            let deadline = target.effective_timeout(self.default_timeout);
            handles.push(tokio::spawn(execute(target.clone(), deadline)));
        }

        // join_all yields in spawn order, so concurrency affects timing only,
        // never the reported order.
        let joined = futures::future::join_all(handles).await;

        targets
            .iter()
            .zip(joined)
            .map(|(target, result)| conclude(target, result))
            .collect()
    }
}

async fn execute(target: CheckTarget, deadline: Duration) -> CheckOutcome {
    let start = Instant::now();
    let result = timeout(deadline, target.verify()).await;
    let duration = start.elapsed();

    let (status, detail) = match result {
        Ok(Ok(())) => (CheckStatus::Success, None),
        Ok(Err(e)) => (CheckStatus::Failure, Some(e.to_string())),
        // The losing verify future is dropped here, which releases any
        // connection it was holding.
        Err(_) => (CheckStatus::Timeout, Some(format!("exceeded {:?}", deadline))),
    };

    match status {
        CheckStatus::Success => debug!("check {} passed in {:?}", target.name, duration),
        _ => warn!(
            "check {} concluded {}: {}",
            target.name,
            status,
            detail.as_deref().unwrap_or("")
        ),
    }

    CheckOutcome {
        name: target.name,
        kind: target.spec.kind(),
        status,
        detail,
        duration,
    }
}

/// A panicking check surfaces as a JoinError for its task alone; it becomes a
/// Failure outcome for that target so the run never loses an outcome and
/// never aborts for the others.
fn conclude(target: &CheckTarget, result: Result<CheckOutcome, JoinError>) -> CheckOutcome {
    match result {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("check {} aborted: {}", target.name, e);
            let detail = if e.is_panic() {
                "check panicked".to_string()
            } else {
                format!("check aborted: {}", e)
            };
            CheckOutcome {
                name: target.name.clone(),
                kind: target.kind(),
                status: CheckStatus::Failure,
                detail: Some(detail),
                duration: Duration::ZERO,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::CheckSpec;

    fn http_target(name: &str) -> CheckTarget {
        CheckTarget {
            name: name.to_string(),
            timeout: None,
            spec: CheckSpec::HttpEndpoint {
                url: "http://127.0.0.1:1".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn panicking_task_becomes_failure_outcome() {
        let handle = tokio::spawn(async {
            panic!("boom");
        });
        let join_err = handle.await.unwrap_err();

        let target = http_target("panicky");
        let outcome = conclude(&target, Err(join_err));

        assert_eq!(outcome.name, "panicky");
        assert_eq!(outcome.status, CheckStatus::Failure);
        assert_eq!(outcome.detail.as_deref(), Some("check panicked"));
    }

    #[test]
    fn effective_timeout_prefers_target_override() {
        let mut target = http_target("t");
        assert_eq!(target.effective_timeout(DEFAULT_TIMEOUT), DEFAULT_TIMEOUT);

        target.timeout = Some(Duration::from_secs(2));
        assert_eq!(
            target.effective_timeout(DEFAULT_TIMEOUT),
            Duration::from_secs(2)
        );
    }
}
