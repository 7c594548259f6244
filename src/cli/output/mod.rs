//! Output formatting module for CLI

mod csv;
mod json;
mod markdown;
mod terminal;

pub use csv::CsvOutput;
pub use json::JsonOutput;
pub use markdown::MarkdownReport;
pub use terminal::TerminalOutput;

use crate::error::AuditError;
use crate::report::AuditReport;

/// Trait for rendering report output
pub trait ReportRenderer {
    fn render_report(&self, report: &AuditReport) -> Result<String, AuditError>;
}
