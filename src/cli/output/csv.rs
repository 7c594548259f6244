//! CSV report rendering

use super::ReportRenderer;
use crate::error::AuditError;
use crate::report::AuditReport;

/// One row per finding: `rule_id,severity,path,line,message`.
pub struct CsvOutput;

impl CsvOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

impl ReportRenderer for CsvOutput {
    fn render_report(&self, report: &AuditReport) -> Result<String, AuditError> {
        let mut lines = vec!["rule_id,severity,path,line,message".to_string()];

        for finding in &report.findings {
            let path = finding.path.as_deref().unwrap_or("");
            let line = finding
                .meta
                .get("line")
                .and_then(|v| v.as_u64())
                .map(|l| l.to_string())
                .unwrap_or_default();
            lines.push(format!(
                "{},{},{},{},{}",
                escape(&finding.rule_id),
                finding.severity,
                escape(path),
                line,
                escape(&finding.message),
            ));
        }

        lines.push(String::new());
        Ok(lines.join("\n"))
    }
}
