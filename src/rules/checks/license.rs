//! License rule: a non-empty license file must exist at the root

use std::fs;

use anyhow::Result;

use crate::rules::engine::Rule;
use crate::rules::results::{Finding, Severity};
use crate::rules::RuleContext;

/// Accepted license filenames, probed in order. The first one that exists
/// decides the outcome; later candidates are not consulted.
const LICENSE_CANDIDATES: &[&str] = &[
    "LICENSE",
    "LICENSE.txt",
    "LICENSE.md",
    "COPYING",
    "COPYING.txt",
    "NOTICE",
];

/// Checks that the repository carries a non-empty license file.
pub struct LicenseRule;

impl Rule for LicenseRule {
    fn id(&self) -> &'static str {
        "LIC001"
    }

    fn description(&self) -> &'static str {
        "The project must include a valid license file at the root"
    }

    fn check(&self, ctx: &RuleContext) -> Result<Vec<Finding>> {
        let root = ctx.repo_root();

        for name in LICENSE_CANDIDATES {
            let path = root.join(name);
            if !path.exists() {
                continue;
            }

            // An unreadable license is evidence the license cannot be
            // verified, not a condition to skip over.
            let content = match fs::read(&path) {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(err) => {
                    return Ok(vec![Finding::new(
                        self.id(),
                        Severity::High,
                        format!("License file could not be read: {err}"),
                    )
                    .with_path(path.display().to_string())]);
                }
            };

            if content.trim().is_empty() {
                return Ok(vec![Finding::new(
                    self.id(),
                    Severity::High,
                    "License file is empty",
                )
                .with_path(path.display().to_string())]);
            }

            return Ok(Vec::new());
        }

        let suggested: Vec<String> = LICENSE_CANDIDATES.iter().map(|c| c.to_string()).collect();
        Ok(vec![Finding::new(
            self.id(),
            Severity::High,
            "No accepted license file found",
        )
        .with_path(root.display().to_string())
        .with_meta("suggested_files", suggested)])
    }
}
