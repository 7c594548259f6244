//! Markdown report rendering

use super::ReportRenderer;
use crate::error::AuditError;
use crate::report::AuditReport;
use crate::rules::{Finding, Severity};

/// Markdown rendering grouped by severity, most severe first.
pub struct MarkdownReport;

impl MarkdownReport {
    pub fn new() -> Self {
        Self
    }

    fn section(&self, lines: &mut Vec<String>, severity: Severity, findings: &[&Finding]) {
        if findings.is_empty() {
            return;
        }

        lines.push(format!("## {} Severity", severity));
        lines.push(String::new());
        lines.push("| Rule | File | Line | Message |".to_string());
        lines.push("|------|------|------|---------|".to_string());

        let mut sorted: Vec<&Finding> = findings.to_vec();
        sorted.sort_by_key(|f| (f.path.clone().unwrap_or_default(), line_of(f).unwrap_or(0)));

        for finding in sorted {
            let file = finding.path.as_deref().unwrap_or("N/A");
            let line = line_of(finding)
                .map(|l| l.to_string())
                .unwrap_or_else(|| "N/A".to_string());
            lines.push(format!(
                "| {} | `{}` | {} | {} |",
                finding.rule_id, file, line, finding.message
            ));
        }

        lines.push(String::new());
    }
}

/// Matched line number from the finding metadata, when present.
fn line_of(finding: &Finding) -> Option<u64> {
    finding.meta.get("line").and_then(|v| v.as_u64())
}

impl Default for MarkdownReport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for MarkdownReport {
    fn render_report(&self, report: &AuditReport) -> Result<String, AuditError> {
        let summary = &report.summary;

        let mut lines = vec![
            "# Repository Compliance Report".to_string(),
            String::new(),
            "## Summary".to_string(),
            format!("- Total findings: {}", summary.total),
            format!("- High severity: {}", summary.by_severity.high),
            format!("- Medium severity: {}", summary.by_severity.medium),
            format!("- Low severity: {}", summary.by_severity.low),
            String::new(),
        ];

        if summary.total == 0 {
            lines.push("## Result".to_string());
            lines.push("No issues were found in the repository analysis.".to_string());
            return Ok(lines.join("\n"));
        }

        for severity in [Severity::High, Severity::Medium, Severity::Low] {
            let group: Vec<&Finding> = report
                .findings
                .iter()
                .filter(|f| f.severity == severity)
                .collect();
            self.section(&mut lines, severity, &group);
        }

        Ok(lines.join("\n"))
    }
}
