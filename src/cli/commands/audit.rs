//! Audit command - run the compliance rules and emit a JSON report

use std::fs;

use colored::Colorize;

use super::AuditArgs;
use crate::cli::exit_codes;
use crate::cli::output::{JsonOutput, ReportRenderer, TerminalOutput};
use crate::error::AuditError;
use crate::report::AuditReport;
use crate::rules::{AuditEngine, RuleContext};

pub fn execute(args: AuditArgs) -> Result<i32, AuditError> {
    // A non-existent repo root is legal; it audits as empty.
    let repo_root = args.repo.canonicalize().unwrap_or(args.repo.clone());
    let ctx = RuleContext::new(&repo_root).with_ignore_dirs(args.ignore_dirs);

    let mut engine = AuditEngine::new();
    if let Some(only) = args.only {
        engine.set_only_rules(only);
    }
    if let Some(skip) = args.skip {
        engine.set_skip_rules(skip);
    }

    let findings = engine.run(&ctx);
    let report = AuditReport::new(repo_root.display().to_string(), findings);

    let json = JsonOutput::new().render_report(&report)?;
    if args.output == "-" {
        println!("{json}");
    } else {
        fs::write(&args.output, &json).map_err(|e| AuditError::FileWrite {
            path: args.output.clone(),
            source: e,
        })?;
        println!("{}", TerminalOutput::new().render_report(&report)?);
        println!(
            "{} Report written to: {}",
            "Success:".green().bold(),
            args.output.cyan()
        );
    }

    let breached = match (args.fail_on.threshold(), report.worst_severity()) {
        (Some(threshold), Some(worst)) => worst >= threshold,
        _ => false,
    };

    Ok(if breached {
        exit_codes::THRESHOLD_EXCEEDED
    } else {
        exit_codes::SUCCESS
    })
}
