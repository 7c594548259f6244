//! Secret-scan rule: no secret-like assignments in tracked files

use anyhow::Result;

use crate::rules::engine::Rule;
use crate::rules::patterns::SECRET_PATTERNS;
use crate::rules::results::{Finding, Severity};
use crate::rules::RuleContext;
use crate::scanner::{read_lines, walk_files};

/// File suffixes never scanned for secrets. Documentation and data formats
/// produce too much noise to be worth the signal.
const IGNORED_SUFFIXES: &[&str] = &[
    ".gitignore",
    ".md",
    ".txt",
    ".json",
    ".xml",
    ".yaml",
    ".yml",
];

/// Scans every non-ignored readable file for secret-like key=value lines.
///
/// At most one finding is emitted per (file, line): when several patterns
/// match the same line, the first one in priority order is reported.
/// Unreadable files are skipped; the scan of the remaining files continues.
pub struct SecretsRule;

impl SecretsRule {
    fn is_ignored_name(&self, name: &str) -> bool {
        IGNORED_SUFFIXES.iter().any(|suffix| name.ends_with(suffix))
    }
}

impl Rule for SecretsRule {
    fn id(&self) -> &'static str {
        "SEC001"
    }

    fn description(&self) -> &'static str {
        "No exposed secrets may exist in the code"
    }

    fn check(&self, ctx: &RuleContext) -> Result<Vec<Finding>> {
        let root = ctx.repo_root();
        let mut findings = Vec::new();

        for path in walk_files(ctx) {
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if self.is_ignored_name(name) {
                continue;
            }

            let relative = path.strip_prefix(root).unwrap_or(&path);

            for (line_number, line) in read_lines(&path).iter().enumerate() {
                if let Some(pattern) = SECRET_PATTERNS.iter().find(|p| p.regex.is_match(line)) {
                    findings.push(
                        Finding::new(
                            self.id(),
                            Severity::High,
                            format!("Possible exposed secret: {}", pattern.name),
                        )
                        .with_path(relative.display().to_string())
                        .with_meta("line", line_number + 1)
                        .with_meta("snippet", line.trim())
                        .with_meta("pattern", pattern.name),
                    );
                }
            }
        }

        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn check(root: &std::path::Path) -> Vec<Finding> {
        SecretsRule.check(&RuleContext::new(root)).unwrap()
    }

    #[test]
    fn test_clean_tree_has_no_findings() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("main.py"), "print('hello')\n").unwrap();

        assert!(check(tmp.path()).is_empty());
    }

    #[test]
    fn test_one_finding_per_file_and_line() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.py"), "TOKEN=abc\n").unwrap();
        fs::write(tmp.path().join("b.sh"), "export TOKEN=def\n").unwrap();
        fs::write(tmp.path().join("c.env"), "TOKEN=ghi\n").unwrap();

        let findings = check(tmp.path());
        assert_eq!(findings.len(), 3);
        for finding in &findings {
            assert_eq!(finding.rule_id, "SEC001");
            assert_eq!(finding.severity, Severity::High);
            assert_eq!(finding.meta["line"], 1);
        }
    }

    #[test]
    fn test_first_pattern_in_priority_order_wins() {
        let tmp = TempDir::new().unwrap();
        // Both SECRET_KEY= and TOKEN= match; SECRET_KEY= has priority.
        fs::write(tmp.path().join("conf.py"), "SECRET_KEY_TOKEN=x\n").unwrap();

        let findings = check(tmp.path());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].meta["pattern"], "SECRET_KEY=");
    }

    #[test]
    fn test_multiple_lines_in_one_file_all_reported() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("settings.py"),
            "API_KEY=one\nDEBUG=True\nPASSWORD=two\n",
        )
        .unwrap();

        let findings = check(tmp.path());
        assert_eq!(findings.len(), 2);
        assert_eq!(findings[0].meta["line"], 1);
        assert_eq!(findings[1].meta["line"], 3);
    }

    #[test]
    fn test_ignored_suffixes_are_skipped() {
        let tmp = TempDir::new().unwrap();
        for name in ["README.md", "notes.txt", "data.json", "report.xml", "ci.yaml", "ci.yml"] {
            fs::write(tmp.path().join(name), "TOKEN=abc\n").unwrap();
        }
        fs::write(tmp.path().join(".gitignore"), "TOKEN=abc\n").unwrap();

        assert!(check(tmp.path()).is_empty());
    }

    #[test]
    fn test_paths_are_relative_to_root() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/app.py"), "SECRET=x\n").unwrap();

        let findings = check(tmp.path());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].path.as_deref(), Some("src/app.py"));
    }

    #[test]
    fn test_ignored_dirs_are_skipped() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("vendor")).unwrap();
        fs::write(tmp.path().join("vendor/lib.py"), "TOKEN=x\n").unwrap();

        let ctx = RuleContext::new(tmp.path()).with_ignore_dirs(vec!["vendor".to_string()]);
        assert!(SecretsRule.check(&ctx).unwrap().is_empty());
    }

    #[test]
    fn test_snippet_is_trimmed() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("run.sh"), "    TOKEN=abc   \n").unwrap();

        let findings = check(tmp.path());
        assert_eq!(findings[0].meta["snippet"], "TOKEN=abc");
    }
}
