//! Integration tests for the rule engine over real file trees

use std::fs;

use tempfile::TempDir;

use repoaudit::report::{AuditReport, ReportSummary};
use repoaudit::rules::{default_rules, run_rules, Finding, Rule, RuleContext, Severity};

/// A fixture tree violating every default rule at once.
fn violating_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join(".gitignore"), "*.pyc\n").unwrap();
    fs::write(root.join("config.json"), "{}").unwrap();
    fs::write(root.join("Makefile"), "run:\n\ttrue\n").unwrap();
    fs::write(
        root.join("coverage.xml"),
        r#"<coverage line-rate="0.42"/>"#,
    )
    .unwrap();
    fs::write(root.join("app.py"), "TOKEN=abc123\n").unwrap();

    temp_dir
}

/// A fixture tree satisfying every default rule.
fn clean_repo() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join(".gitignore"), ".env\n").unwrap();
    fs::write(root.join("LICENSE"), "MIT License\n").unwrap();
    fs::write(
        root.join("Makefile"),
        "run:\n\ttrue\ntest:\n\ttrue\nlint:\n\ttrue\nplan:\n\ttrue\napply:\n\ttrue\n",
    )
    .unwrap();
    fs::write(
        root.join("coverage.xml"),
        r#"<coverage line-rate="0.95"/>"#,
    )
    .unwrap();
    fs::write(
        root.join("app.py"),
        "import os\nport = os.environ['PORT']\n",
    )
    .unwrap();

    temp_dir
}

#[test]
fn test_violating_repo_triggers_every_rule() {
    let repo = violating_repo();
    let ctx = RuleContext::new(repo.path());

    let findings = run_rules(&ctx, &default_rules());
    let ids: Vec<&str> = findings.iter().map(|f| f.rule_id.as_str()).collect();

    assert!(ids.contains(&"GIT001"));
    assert!(ids.contains(&"CFG001"));
    assert!(ids.contains(&"BLD001"));
    assert!(ids.contains(&"LIC001"));
    assert!(ids.contains(&"COV001"));
    assert!(ids.contains(&"SEC001"));
}

#[test]
fn test_clean_repo_produces_no_findings() {
    let repo = clean_repo();
    let ctx = RuleContext::new(repo.path());

    let findings = run_rules(&ctx, &default_rules());
    assert!(findings.is_empty(), "unexpected findings: {findings:?}");
}

#[test]
fn test_findings_follow_rule_order() {
    let repo = violating_repo();
    let ctx = RuleContext::new(repo.path());
    let rules = default_rules();

    let findings = run_rules(&ctx, &rules);

    // Every finding's rule must appear no earlier than the previous one's.
    let rule_positions: Vec<usize> = findings
        .iter()
        .map(|f| rules.iter().position(|r| r.id() == f.rule_id).unwrap())
        .collect();
    let mut sorted = rule_positions.clone();
    sorted.sort();
    assert_eq!(rule_positions, sorted);
}

#[test]
fn test_nonexistent_root_audits_as_empty() {
    let ctx = RuleContext::new("/definitely/not/a/real/path");
    let findings = run_rules(&ctx, &default_rules());

    // Missing-file rules fire; scanning rules stay silent.
    let ids: Vec<&str> = findings.iter().map(|f| f.rule_id.as_str()).collect();
    assert!(ids.contains(&"GIT001"));
    assert!(ids.contains(&"LIC001"));
    assert!(!ids.contains(&"SEC001"));
    assert!(!ids.contains(&"CFG001"));
}

#[test]
fn test_secret_findings_across_three_files() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.py"), "TOKEN=one\n").unwrap();
    fs::write(root.join("b.py"), "TOKEN=two\n").unwrap();
    fs::write(root.join("c.py"), "TOKEN=three\n").unwrap();
    // Ignored extension must contribute nothing.
    fs::write(root.join("README.md"), "TOKEN=nope\n").unwrap();

    let ctx = RuleContext::new(root);
    let findings = run_rules(&ctx, &default_rules());

    let secrets: Vec<&Finding> = findings.iter().filter(|f| f.rule_id == "SEC001").collect();
    assert_eq!(secrets.len(), 3);
    assert!(secrets.iter().all(|f| f.severity == Severity::High));
}

struct BrokenRule;

impl Rule for BrokenRule {
    fn id(&self) -> &'static str {
        "BAD001"
    }

    fn description(&self) -> &'static str {
        "fails with a descriptive error"
    }

    fn check(&self, _ctx: &RuleContext) -> anyhow::Result<Vec<Finding>> {
        Err(anyhow::anyhow!("x"))
    }
}

#[test]
fn test_crash_isolation_with_mixed_rule_list() {
    let repo = violating_repo();
    let ctx = RuleContext::new(repo.path());

    let mut rules = default_rules();
    rules.insert(0, Box::new(BrokenRule));

    let findings = run_rules(&ctx, &rules);

    let crashes: Vec<&Finding> = findings
        .iter()
        .filter(|f| f.meta.get("crash").is_some())
        .collect();
    assert_eq!(crashes.len(), 1);
    assert_eq!(crashes[0].rule_id, "BAD001");
    assert_eq!(crashes[0].severity, Severity::Medium);
    assert!(crashes[0].message.contains('x'));
    assert_eq!(crashes[0].meta["crash"], true);

    // The crash comes first and the remaining rules still ran.
    assert_eq!(findings[0].rule_id, "BAD001");
    assert!(findings.len() > 1);
}

#[test]
fn test_summary_counts_match_report_contract() {
    let repo = violating_repo();
    let ctx = RuleContext::new(repo.path());

    let findings = run_rules(&ctx, &default_rules());
    let report = AuditReport::new(repo.path().display().to_string(), findings.clone());

    let summary = ReportSummary::from_findings(&findings);
    assert_eq!(report.summary, summary);
    assert_eq!(
        summary.total,
        summary.by_severity.high + summary.by_severity.medium + summary.by_severity.low
    );
}

#[test]
fn test_runs_are_idempotent() {
    let repo = violating_repo();
    let ctx = RuleContext::new(repo.path());

    let first = run_rules(&ctx, &default_rules());
    let second = run_rules(&ctx, &default_rules());
    assert_eq!(first, second);
}
