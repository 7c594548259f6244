//! Report assembly - summary counts and the serializable audit payload

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AuditError;
use crate::rules::{Finding, Severity};

/// Finding counts partitioned by severity.
///
/// Serialized with the severity literals as keys, matching the report
/// contract: `{"High": n, "Medium": n, "Low": n}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityBreakdown {
    #[serde(rename = "High")]
    pub high: usize,
    #[serde(rename = "Medium")]
    pub medium: usize,
    #[serde(rename = "Low")]
    pub low: usize,
}

/// Aggregated counts over one findings sequence.
///
/// Assembly is pure and order-independent: a permutation of the input
/// findings yields identical counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: usize,
    pub by_severity: SeverityBreakdown,
}

impl ReportSummary {
    /// Compute the summary for a findings sequence
    pub fn from_findings(findings: &[Finding]) -> Self {
        let mut by_severity = SeverityBreakdown::default();
        for finding in findings {
            match finding.severity {
                Severity::High => by_severity.high += 1,
                Severity::Medium => by_severity.medium += 1,
                Severity::Low => by_severity.low += 1,
            }
        }

        Self {
            total: findings.len(),
            by_severity,
        }
    }
}

/// The full serializable result of one audit run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    /// Repository root the audit ran against
    pub repo_root: String,
    #[serde(default)]
    pub summary: ReportSummary,
    #[serde(default)]
    pub findings: Vec<Finding>,
}

impl AuditReport {
    /// Assemble a report from a findings sequence
    pub fn new(repo_root: impl Into<String>, findings: Vec<Finding>) -> Self {
        Self {
            repo_root: repo_root.into(),
            summary: ReportSummary::from_findings(&findings),
            findings,
        }
    }

    /// The most severe finding in the report, if any
    pub fn worst_severity(&self) -> Option<Severity> {
        self.findings.iter().map(|f| f.severity).max()
    }
}

/// Load a report from disk, recomputing the summary from the findings so
/// hand-edited or summary-less payloads stay consistent.
pub fn load_report(path: &Path) -> Result<AuditReport, AuditError> {
    let content = std::fs::read_to_string(path).map_err(|e| AuditError::FileRead {
        path: path.display().to_string(),
        source: e,
    })?;

    let mut report: AuditReport =
        serde_json::from_str(&content).map_err(|e| AuditError::ReportParse {
            path: path.display().to_string(),
            source: e,
        })?;
    report.summary = ReportSummary::from_findings(&report.findings);

    Ok(report)
}
