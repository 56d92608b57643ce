// src/report/mod.rs
use crate::checks::CheckKind;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use std::time::Duration;

/// Exit code for a run that could not start because the configuration is
/// unusable. Distinct from the unhealthy code so supervisors can tell
/// "dependencies are down" from "fix the config".
pub const CONFIG_ERROR_EXIT: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Success,
    Failure,
    /// No conclusive result within the deadline. Kept separate from Failure
    /// so the report distinguishes "actively refused" from "never responded".
    Timeout,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // pad() keeps report column alignment working
        f.pad(match self {
            CheckStatus::Success => "success",
            CheckStatus::Failure => "failure",
            CheckStatus::Timeout => "timeout",
        })
    }
}

/// Result of one check attempt. Created exactly once per configured target,
/// never mutated afterwards.
#[derive(Debug, Serialize)]
pub struct CheckOutcome {
    pub name: String,
    pub kind: CheckKind,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: Duration,
}

fn serialize_millis<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u64(duration.as_millis() as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Overall {
    Healthy,
    Unhealthy,
}

impl fmt::Display for Overall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Overall::Healthy => "healthy",
            Overall::Unhealthy => "unhealthy",
        })
    }
}

/// Aggregate over all outcomes of one run, in configuration order.
#[derive(Debug, Serialize)]
pub struct Verdict {
    pub overall: Overall,
    pub outcomes: Vec<CheckOutcome>,
    pub finished_at: DateTime<Utc>,
}

impl Verdict {
    /// Pure aggregation: healthy iff every outcome is a success. An empty run
    /// is vacuously healthy.
    pub fn from_outcomes(outcomes: Vec<CheckOutcome>) -> Self {
        let overall = if outcomes
            .iter()
            .all(|outcome| outcome.status == CheckStatus::Success)
        {
            Overall::Healthy
        } else {
            Overall::Unhealthy
        };

        Self {
            overall,
            outcomes,
            finished_at: Utc::now(),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.overall {
            Overall::Healthy => 0,
            Overall::Unhealthy => 1,
        }
    }

    /// One line per target, configuration order, plus a trailing overall line.
    pub fn render(&self) -> String {
        let mut lines = Vec::with_capacity(self.outcomes.len() + 1);

        for outcome in &self.outcomes {
            let mut line = format!(
                "{:<24} {:<20} {:<8} {:>6}ms",
                outcome.name,
                outcome.kind,
                outcome.status,
                outcome.duration.as_millis()
            );
            if let Some(detail) = &outcome.detail {
                line.push_str("  ");
                line.push_str(detail);
            }
            lines.push(line);
        }

        lines.push(format!("overall: {}", self.overall));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn outcome(name: &str, status: CheckStatus, detail: Option<&str>) -> CheckOutcome {
        CheckOutcome {
            name: name.to_string(),
            kind: CheckKind::HttpEndpoint,
            status,
            detail: detail.map(str::to_string),
            duration: Duration::from_millis(12),
        }
    }

    #[test]
    fn all_success_is_healthy() {
        let verdict = Verdict::from_outcomes(vec![
            outcome("a", CheckStatus::Success, None),
            outcome("b", CheckStatus::Success, None),
        ]);
        assert_eq!(verdict.overall, Overall::Healthy);
        assert_eq!(verdict.exit_code(), 0);
    }

    #[test]
    fn one_timeout_is_unhealthy() {
        let verdict = Verdict::from_outcomes(vec![
            outcome("a", CheckStatus::Success, None),
            outcome("b", CheckStatus::Timeout, Some("exceeded 2s")),
        ]);
        assert_eq!(verdict.overall, Overall::Unhealthy);
        assert_eq!(verdict.exit_code(), 1);
    }

    #[test]
    fn empty_run_is_healthy() {
        let verdict = Verdict::from_outcomes(vec![]);
        assert_eq!(verdict.overall, Overall::Healthy);
        assert_eq!(verdict.exit_code(), 0);
    }

    #[test]
    fn render_lists_every_target_in_order() {
        let verdict = Verdict::from_outcomes(vec![
            outcome("web", CheckStatus::Success, None),
            outcome("db", CheckStatus::Failure, Some("connection failed: refused")),
        ]);

        let rendered = verdict.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("web"));
        assert!(lines[1].starts_with("db"));
        assert!(lines[1].contains("connection failed: refused"));
        assert_eq!(lines[2], "overall: unhealthy");
    }

    #[test]
    fn json_report_carries_status_and_duration() {
        let verdict = Verdict::from_outcomes(vec![outcome(
            "web",
            CheckStatus::Failure,
            Some("unexpected status 503"),
        )]);

        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["overall"], "unhealthy");
        assert_eq!(json["outcomes"][0]["status"], "failure");
        assert_eq!(json["outcomes"][0]["kind"], "http_endpoint");
        assert_eq!(json["outcomes"][0]["duration_ms"], 12);
        assert_eq!(json["outcomes"][0]["detail"], "unexpected status 503");
    }

    proptest! {
        #[test]
        fn healthy_iff_every_outcome_succeeded(statuses in prop::collection::vec(0u8..3, 0..16)) {
            let outcomes: Vec<CheckOutcome> = statuses
                .iter()
                .map(|s| {
                    let status = match s {
                        0 => CheckStatus::Success,
                        1 => CheckStatus::Failure,
                        _ => CheckStatus::Timeout,
                    };
                    outcome("t", status, None)
                })
                .collect();

            let all_success = outcomes.iter().all(|o| o.status == CheckStatus::Success);
            let verdict = Verdict::from_outcomes(outcomes);

            prop_assert_eq!(verdict.overall == Overall::Healthy, all_success);
            prop_assert_eq!(verdict.exit_code() == 0, all_success);
        }
    }
}
