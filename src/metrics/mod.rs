//! PR process metrics derived from an audit report and GitHub activity
//!
//! The derivations are pure over fetched data so they can be tested without
//! the network; the `metrics` command wires them to the GitHub client (or to
//! fixed demo values).

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AuditError;
use crate::report::SeverityBreakdown;

/// Pull request facts needed for the time metrics.
#[derive(Debug, Clone)]
pub struct PrInfo {
    pub number: u64,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
    pub head_sha: String,
}

/// One submitted review on a pull request.
#[derive(Debug, Clone)]
pub struct ReviewInfo {
    pub state: String,
    pub submitted_at: DateTime<Utc>,
}

/// One workflow run attached to a head SHA.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub name: String,
    pub conclusion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub head_sha: String,
}

/// Computed metrics for one pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrMetrics {
    pub pr_number: u64,
    pub severity_counts: SeverityBreakdown,
    pub cycle_time_hours: Option<f64>,
    pub approval_time_hours: Option<f64>,
    pub remediation_time_hours: Option<f64>,
    pub blocked_time_hours: Option<f64>,
    /// Trend versus the previous run; "n/a" without historical data.
    pub trend: String,
}

fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_seconds() as f64 / 3600.0
}

/// Hours from PR creation to merge; `None` for unmerged PRs.
pub fn cycle_time_hours(pr: &PrInfo) -> Option<f64> {
    pr.merged_at.map(|merged| hours_between(pr.created_at, merged))
}

/// Hours from PR creation to the last APPROVED review; `None` without one.
pub fn approval_time_hours(reviews: &[ReviewInfo], created_at: DateTime<Utc>) -> Option<f64> {
    reviews
        .iter()
        .filter(|r| r.state.eq_ignore_ascii_case("approved"))
        .map(|r| r.submitted_at)
        .max()
        .map(|last| hours_between(created_at, last))
}

/// Remediation time (first failure to first success) and blocked time
/// (last failure to first success), in hours. Both are `None` unless the
/// runs contain at least one failure and one success.
pub fn remediation_and_blocked_hours(runs: &[WorkflowRun]) -> (Option<f64>, Option<f64>) {
    let failures: Vec<&WorkflowRun> = runs
        .iter()
        .filter(|r| r.conclusion.as_deref() == Some("failure"))
        .collect();
    let successes: Vec<&WorkflowRun> = runs
        .iter()
        .filter(|r| r.conclusion.as_deref() == Some("success"))
        .collect();

    if failures.is_empty() || successes.is_empty() {
        return (None, None);
    }

    let first_failure = failures.iter().map(|r| r.created_at).min().unwrap();
    let last_failure = failures.iter().map(|r| r.created_at).max().unwrap();
    let first_success = successes.iter().map(|r| r.created_at).min().unwrap();

    (
        Some(hours_between(first_failure, first_success)),
        Some(hours_between(last_failure, first_success)),
    )
}

impl PrMetrics {
    /// The payload shape consumed by the `publish` command: summary counts
    /// plus the time metrics, with an empty findings list.
    pub fn to_publish_payload(&self) -> serde_json::Value {
        let counts = &self.severity_counts;
        json!({
            "summary": {
                "total": counts.high + counts.medium + counts.low,
                "by_severity": counts,
            },
            "findings": [],
            "time_metrics": {
                "cycle_time_hours": self.cycle_time_hours,
                "approval_time_hours": self.approval_time_hours,
                "remediation_time_hours": self.remediation_time_hours,
                "blocked_time_hours": self.blocked_time_hours,
            },
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), AuditError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| AuditError::FileWrite {
                path: path.display().to_string(),
                source: e,
            })?;
        }
    }
    fs::write(path, content).map_err(|e| AuditError::FileWrite {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write the publish-format metrics payload.
pub fn save_metrics_json(metrics: &PrMetrics, path: &Path) -> Result<(), AuditError> {
    let payload = serde_json::to_string_pretty(&metrics.to_publish_payload())?;
    write_file(path, &payload)
}

/// Write the trend payload consumed by the `publish` command.
pub fn save_trends_json(metrics: &PrMetrics, path: &Path) -> Result<(), AuditError> {
    let payload = serde_json::to_string_pretty(&json!({ "trend": metrics.trend }))?;
    write_file(path, &payload)
}

const CSV_HEADER: &str = "pr_number,high,medium,low,cycle_time_hours,approval_time_hours,\
                          remediation_time_hours,blocked_time_hours,trend";

fn format_opt(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

/// Append one metrics row, writing the header when the file is created.
pub fn save_metrics_csv(metrics: &PrMetrics, path: &Path) -> Result<(), AuditError> {
    let counts = &metrics.severity_counts;
    let row = format!(
        "{},{},{},{},{},{},{},{},{}",
        metrics.pr_number,
        counts.high,
        counts.medium,
        counts.low,
        format_opt(metrics.cycle_time_hours),
        format_opt(metrics.approval_time_hours),
        format_opt(metrics.remediation_time_hours),
        format_opt(metrics.blocked_time_hours),
        metrics.trend,
    );

    let mut content = if path.exists() {
        fs::read_to_string(path).map_err(|e| AuditError::FileRead {
            path: path.display().to_string(),
            source: e,
        })?
    } else {
        format!("{CSV_HEADER}\n")
    };
    content.push_str(&row);
    content.push('\n');

    write_file(path, &content)
}
