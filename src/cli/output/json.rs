//! JSON output formatting

use super::ReportRenderer;
use crate::error::AuditError;
use crate::report::AuditReport;

/// Canonical JSON rendering of the audit report.
pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportRenderer for JsonOutput {
    fn render_report(&self, report: &AuditReport) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Finding, Severity};

    #[test]
    fn test_render_report_matches_contract() {
        let report = AuditReport::new(
            "/repo",
            vec![
                Finding::new("SEC001", Severity::High, "Possible exposed secret")
                    .with_path("app.py")
                    .with_meta("line", 3),
                Finding::new("COV001", Severity::Medium, "No coverage.xml found"),
            ],
        );

        let rendered = JsonOutput::new().render_report(&report).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["repo_root"], "/repo");
        assert_eq!(json["summary"]["total"], 2);
        assert_eq!(json["summary"]["by_severity"]["High"], 1);
        assert_eq!(json["findings"][0]["rule_id"], "SEC001");
        assert_eq!(json["findings"][0]["severity"], "High");
        assert_eq!(json["findings"][1]["path"], serde_json::Value::Null);
        assert_eq!(json["findings"][1]["meta"], serde_json::json!({}));
    }

    #[test]
    fn test_render_empty_report() {
        let report = AuditReport::new("/repo", Vec::new());
        let rendered = JsonOutput::new().render_report(&report).unwrap();
        let json: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(json["summary"]["total"], 0);
        assert!(json["findings"].as_array().unwrap().is_empty());
    }
}
