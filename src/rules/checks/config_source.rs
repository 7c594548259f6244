//! Config-source rule: configuration should come from the environment

use anyhow::Result;

use crate::rules::engine::Rule;
use crate::rules::patterns::ENV_LOOKUP;
use crate::rules::results::{Finding, Severity};
use crate::rules::RuleContext;
use crate::scanner::{read_lines, walk_files};

/// Static configuration files recognized at the repository root.
const STATIC_CONFIG_CANDIDATES: &[&str] = &[
    "config.json",
    "config.yaml",
    "config.yml",
    "settings.json",
    "settings.yaml",
    "settings.yml",
    "appsettings.json",
    "application.yaml",
    "application.yml",
];

/// Source file extensions scanned for environment-lookup idioms.
const SOURCE_EXTENSIONS: &[&str] = &[
    "py", "rs", "js", "ts", "jsx", "tsx", "rb", "php", "java", "go", "cs", "sh", "bash",
];

/// Flags repositories that ship static configuration files without any
/// environment-variable lookup in their source code.
///
/// The rule is deliberately one-sided: env usage anywhere, or the absence of
/// static config files, keeps it silent. A repository with neither signal is
/// tolerated, not penalized.
pub struct ConfigSourceRule;

impl ConfigSourceRule {
    fn uses_env(&self, ctx: &RuleContext) -> bool {
        for path in walk_files(ctx) {
            let is_source = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| SOURCE_EXTENSIONS.contains(&e))
                .unwrap_or(false);
            if !is_source {
                continue;
            }
            if read_lines(&path).iter().any(|line| ENV_LOOKUP.is_match(line)) {
                return true;
            }
        }
        false
    }

    fn static_configs(&self, ctx: &RuleContext) -> Vec<String> {
        STATIC_CONFIG_CANDIDATES
            .iter()
            .filter(|name| ctx.repo_root().join(name).exists())
            .map(|name| name.to_string())
            .collect()
    }
}

impl Rule for ConfigSourceRule {
    fn id(&self) -> &'static str {
        "CFG001"
    }

    fn description(&self) -> &'static str {
        "Configuration should come from environment variables, not static files"
    }

    fn check(&self, ctx: &RuleContext) -> Result<Vec<Finding>> {
        let static_files = self.static_configs(ctx);
        if static_files.is_empty() || self.uses_env(ctx) {
            return Ok(Vec::new());
        }

        Ok(vec![Finding::new(
            self.id(),
            Severity::Medium,
            format!(
                "No environment-variable lookup detected, but static configuration files exist: {}",
                static_files.join(", ")
            ),
        )
        .with_path(ctx.repo_root().display().to_string())
        .with_meta("static_configs", static_files)
        .with_meta("recommendation", "read configuration from environment variables")])
    }
}
