//! Rule trait and the fault-tolerant runner

use tracing::{debug, info, span, warn, Level};

use super::checks::{
    BuildTargetsRule, ConfigSourceRule, CoverageRule, GitignoreRule, LicenseRule, SecretsRule,
};
use super::context::RuleContext;
use super::results::{Finding, Severity};
use crate::report::ReportSummary;

/// A stateless, re-invocable compliance check.
///
/// Implementations are read-only on the filesystem and idempotent: the same
/// filesystem state yields the same findings. Expected absences (a missing
/// file, a missing pattern) are findings, not errors - `check` returns `Err`
/// only for genuine implementation faults, which the runner converts into a
/// synthetic crash finding rather than propagating.
pub trait Rule: Send + Sync {
    /// Stable rule identifier, unique per variant
    fn id(&self) -> &'static str;

    /// Human-readable description used for reporting
    fn description(&self) -> &'static str;

    /// Evaluate the rule against one context
    fn check(&self, ctx: &RuleContext) -> anyhow::Result<Vec<Finding>>;
}

/// The built-in rule set, in default execution order.
pub fn default_rules() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(GitignoreRule),
        Box::new(ConfigSourceRule),
        Box::new(BuildTargetsRule),
        Box::new(LicenseRule),
        Box::new(CoverageRule),
        Box::new(SecretsRule),
    ]
}

/// Run one rule, converting a failure into the synthetic crash finding.
fn execute_rule(ctx: &RuleContext, rule: &dyn Rule) -> Vec<Finding> {
    let span = span!(Level::DEBUG, "rule", id = rule.id());
    let _guard = span.enter();
    debug!(description = rule.description(), "running rule");

    match rule.check(ctx) {
        Ok(found) => {
            debug!(findings_count = found.len(), "rule completed");
            found
        }
        Err(err) => {
            warn!(error = %err, "rule crashed");
            vec![
                Finding::new(rule.id(), Severity::Medium, format!("Rule crashed: {err}"))
                    .with_meta("crash", true),
            ]
        }
    }
}

/// Execute rules in order, concatenating their findings.
///
/// Rule order is caller-determined and preserved; finding order within a
/// rule is rule-determined and preserved. A rule returning `Err` is isolated
/// into exactly one Medium finding carrying `meta.crash == true` and a
/// message that includes the underlying error; subsequent rules still run.
/// This function never fails as a whole.
pub fn run_rules(ctx: &RuleContext, rules: &[Box<dyn Rule>]) -> Vec<Finding> {
    let mut findings = Vec::new();
    for rule in rules {
        findings.extend(execute_rule(ctx, rule.as_ref()));
    }
    findings
}

/// Engine wrapping the default rule set with id-based filtering.
pub struct AuditEngine {
    rules: Vec<Box<dyn Rule>>,
    only_rules: Option<Vec<String>>,
    skip_rules: Option<Vec<String>>,
}

impl AuditEngine {
    /// Create an engine over the built-in rules
    pub fn new() -> Self {
        Self::with_rules(default_rules())
    }

    /// Create an engine over a caller-supplied rule list
    pub fn with_rules(rules: Vec<Box<dyn Rule>>) -> Self {
        Self {
            rules,
            only_rules: None,
            skip_rules: None,
        }
    }

    /// Restrict the run to these rule ids
    pub fn set_only_rules(&mut self, ids: Vec<String>) {
        self.only_rules = Some(ids);
    }

    /// Exclude these rule ids from the run
    pub fn set_skip_rules(&mut self, ids: Vec<String>) {
        self.skip_rules = Some(ids);
    }

    fn should_run(&self, id: &str) -> bool {
        if let Some(only) = &self.only_rules {
            return only.iter().any(|r| r == id);
        }

        if let Some(skip) = &self.skip_rules {
            return !skip.iter().any(|r| r == id);
        }

        true
    }

    /// Run the selected rules against one context
    pub fn run(&self, ctx: &RuleContext) -> Vec<Finding> {
        info!(repo_root = %ctx.repo_root().display(), "starting audit");

        let mut findings = Vec::new();
        for rule in &self.rules {
            if !self.should_run(rule.id()) {
                debug!(rule = rule.id(), "skipping rule");
                continue;
            }
            findings.extend(execute_rule(ctx, rule.as_ref()));
        }

        let summary = ReportSummary::from_findings(&findings);
        info!(
            "audit complete: {} high, {} medium, {} low",
            summary.by_severity.high, summary.by_severity.medium, summary.by_severity.low,
        );

        findings
    }
}

impl Default for AuditEngine {
    fn default() -> Self {
        Self::new()
    }
}
