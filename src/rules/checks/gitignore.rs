//! Ignore-file rule: `.env` must be listed in `.gitignore`

use anyhow::Result;

use crate::rules::engine::Rule;
use crate::rules::results::{Finding, Severity};
use crate::rules::RuleContext;
use crate::scanner::read_lines;

/// Checks that the repository keeps environment files out of version
/// control by listing `.env` in its root `.gitignore`.
pub struct GitignoreRule;

impl Rule for GitignoreRule {
    fn id(&self) -> &'static str {
        "GIT001"
    }

    fn description(&self) -> &'static str {
        ".env must be listed in .gitignore"
    }

    fn check(&self, ctx: &RuleContext) -> Result<Vec<Finding>> {
        let gitignore = ctx.repo_root().join(".gitignore");
        let lines: Vec<String> = read_lines(&gitignore)
            .iter()
            .map(|l| l.trim().to_string())
            .collect();

        // An absent file and an empty file are indistinguishable here; both
        // mean the .env entry is missing.
        if lines.is_empty() {
            return Ok(vec![Finding::new(
                self.id(),
                Severity::High,
                "No .gitignore found at the repository root",
            )
            .with_path(gitignore.display().to_string())
            .with_meta("hint", "create a .gitignore with a .env entry")]);
        }

        let has_env = lines.iter().any(|l| l == ".env" || l.ends_with("/.env"));
        if !has_env {
            return Ok(vec![Finding::new(
                self.id(),
                Severity::High,
                "The '.env' pattern is not present in .gitignore",
            )
            .with_path(gitignore.display().to_string())
            .with_meta("example", ".env")]);
        }

        Ok(Vec::new())
    }
}
