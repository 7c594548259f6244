//! Build-target rule: the Makefile must cover the required targets

use std::collections::BTreeSet;

use anyhow::Result;

use crate::rules::engine::Rule;
use crate::rules::patterns::TARGET_LABEL;
use crate::rules::results::{Finding, Severity};
use crate::rules::RuleContext;
use crate::scanner::read_lines;

/// Targets every audited repository is expected to define.
const REQUIRED_TARGETS: &[&str] = &["run", "test", "lint", "plan", "apply"];

/// Checks that a root `Makefile` exists and defines the required targets.
pub struct BuildTargetsRule;

impl BuildTargetsRule {
    fn targets_in(&self, makefile: &std::path::Path) -> BTreeSet<String> {
        read_lines(makefile)
            .iter()
            .filter_map(|line| TARGET_LABEL.captures(line))
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

impl Rule for BuildTargetsRule {
    fn id(&self) -> &'static str {
        "BLD001"
    }

    fn description(&self) -> &'static str {
        "Makefile must define the targets: run, test, lint, plan, apply"
    }

    fn check(&self, ctx: &RuleContext) -> Result<Vec<Finding>> {
        let makefile = ctx.repo_root().join("Makefile");

        if !makefile.exists() {
            let mut required: Vec<String> =
                REQUIRED_TARGETS.iter().map(|t| t.to_string()).collect();
            required.sort();
            return Ok(vec![Finding::new(
                self.id(),
                Severity::Medium,
                "No Makefile found at the repository root",
            )
            .with_path(makefile.display().to_string())
            .with_meta("missing", required)]);
        }

        let present = self.targets_in(&makefile);
        let mut missing: Vec<String> = REQUIRED_TARGETS
            .iter()
            .filter(|t| !present.contains(**t))
            .map(|t| t.to_string())
            .collect();
        missing.sort();

        if !missing.is_empty() {
            let present: Vec<String> = present.into_iter().collect();
            return Ok(vec![Finding::new(
                self.id(),
                Severity::Medium,
                format!("Makefile is missing required targets: {}", missing.join(", ")),
            )
            .with_path(makefile.display().to_string())
            .with_meta("missing", missing)
            .with_meta("present", present)]);
        }

        Ok(Vec::new())
    }
}
