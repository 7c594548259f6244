//! Terminal output formatting

use colored::Colorize;

use super::ReportRenderer;
use crate::error::AuditError;
use crate::report::AuditReport;
use crate::rules::Severity;

/// Colored human summary printed after an audit run.
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn severity_label(severity: Severity) -> String {
        match severity {
            Severity::High => severity.as_str().red().bold().to_string(),
            Severity::Medium => severity.as_str().yellow().to_string(),
            Severity::Low => severity.as_str().blue().to_string(),
        }
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for TerminalOutput {
    fn render_report(&self, report: &AuditReport) -> Result<String, AuditError> {
        let summary = &report.summary;
        let mut lines = vec![format!(
            "Audit of {}: {} findings ({} high, {} medium, {} low)",
            report.repo_root.cyan(),
            summary.total,
            summary.by_severity.high,
            summary.by_severity.medium,
            summary.by_severity.low,
        )];

        for finding in &report.findings {
            let location = match (&finding.path, finding.meta.get("line").and_then(|v| v.as_u64()))
            {
                (Some(path), Some(line)) => format!(" {path}:{line}"),
                (Some(path), None) => format!(" {path}"),
                _ => String::new(),
            };
            lines.push(format!(
                "  [{}] {}{} - {}",
                Self::severity_label(finding.severity),
                finding.rule_id,
                location.dimmed(),
                finding.message,
            ));
        }

        if summary.total == 0 {
            lines.push(format!("  {}", "No issues found.".green()));
        }

        Ok(lines.join("\n"))
    }
}
