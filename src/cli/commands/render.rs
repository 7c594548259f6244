//! Render command - turn a JSON report into Markdown or CSV

use std::fs;

use colored::Colorize;

use super::{RenderArgs, RenderFormat};
use crate::cli::exit_codes;
use crate::cli::output::{CsvOutput, MarkdownReport, ReportRenderer};
use crate::error::AuditError;
use crate::report::load_report;

pub fn execute(args: RenderArgs) -> Result<i32, AuditError> {
    let report = load_report(&args.input)?;

    let renderer: Box<dyn ReportRenderer> = match args.format {
        RenderFormat::Markdown => Box::new(MarkdownReport::new()),
        RenderFormat::Csv => Box::new(CsvOutput::new()),
    };
    let rendered = renderer.render_report(&report)?;

    fs::write(&args.output, rendered).map_err(|e| AuditError::FileWrite {
        path: args.output.display().to_string(),
        source: e,
    })?;

    println!(
        "{} Report written to: {}",
        "Success:".green().bold(),
        args.output.display().to_string().cyan()
    );

    Ok(exit_codes::SUCCESS)
}
