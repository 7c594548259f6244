//! Coverage rule: line coverage must be at least 90%

use std::fs;
use std::path::Path;

use anyhow::Result;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::rules::engine::Rule;
use crate::rules::results::{Finding, Severity};
use crate::rules::RuleContext;

const COVERAGE_FILE: &str = "coverage.xml";
const REQUIRED_LINE_RATE: f64 = 0.90;

/// Checks the Cobertura-style `coverage.xml` at the repository root for a
/// `line-rate` of at least 0.90. The boundary is inclusive: exactly 0.90
/// passes.
pub struct CoverageRule;

impl CoverageRule {
    /// Extract the numeric `line-rate` attribute from the document's root
    /// element. Returns `None` for malformed XML or a missing/non-numeric
    /// attribute.
    fn parse_line_rate(&self, path: &Path) -> Option<f64> {
        let content = fs::read_to_string(path).ok()?;
        let mut reader = Reader::from_str(&content);

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                    let value = e
                        .attributes()
                        .flatten()
                        .find(|attr| attr.key.as_ref() == b"line-rate")?
                        .unescape_value()
                        .ok()?;
                    return value.parse::<f64>().ok();
                }
                Ok(Event::Eof) | Err(_) => return None,
                _ => {}
            }
        }
    }
}

impl Rule for CoverageRule {
    fn id(&self) -> &'static str {
        "COV001"
    }

    fn description(&self) -> &'static str {
        "Line coverage must be at least 90%"
    }

    fn check(&self, ctx: &RuleContext) -> Result<Vec<Finding>> {
        let path = ctx.repo_root().join(COVERAGE_FILE);

        if !path.exists() {
            return Ok(vec![Finding::new(
                self.id(),
                Severity::Medium,
                "No coverage.xml found at the repository root",
            )
            .with_path(ctx.repo_root().display().to_string())]);
        }

        let line_rate = match self.parse_line_rate(&path) {
            Some(rate) => rate,
            None => {
                return Ok(vec![Finding::new(
                    self.id(),
                    Severity::Medium,
                    "coverage.xml could not be parsed",
                )
                .with_path(path.display().to_string())]);
            }
        };

        if line_rate < REQUIRED_LINE_RATE {
            return Ok(vec![Finding::new(
                self.id(),
                Severity::Medium,
                format!(
                    "Insufficient coverage: {:.1}% (minimum required: 90%)",
                    line_rate * 100.0
                ),
            )
            .with_path(path.display().to_string())
            .with_meta("coverage", line_rate)
            .with_meta("required", REQUIRED_LINE_RATE)]);
        }

        Ok(Vec::new())
    }
}
