//! Command implementations and their argument types

pub mod audit;
pub mod metrics;
pub mod publish;
pub mod render;

use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::rules::Severity;

/// Severity threshold for `--fail-on`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailOn {
    /// Never fail on findings
    None,
    Low,
    Medium,
    High,
}

impl FailOn {
    /// The minimum severity that trips the threshold, if any
    pub fn threshold(self) -> Option<Severity> {
        match self {
            FailOn::None => None,
            FailOn::Low => Some(Severity::Low),
            FailOn::Medium => Some(Severity::Medium),
            FailOn::High => Some(Severity::High),
        }
    }
}

/// Report output format for `render`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    Markdown,
    Csv,
}

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Path to the repository root to audit
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub repo: PathBuf,

    /// Directory name or relative path excluded from scanning (repeatable)
    #[arg(long = "ignore-dir", value_name = "DIR")]
    pub ignore_dirs: Vec<String>,

    /// Output file for the JSON report ("-" for stdout)
    #[arg(short, long, default_value = "-", value_name = "FILE")]
    pub output: String,

    /// Severity threshold for a non-zero exit code
    #[arg(long, value_enum, default_value = "none")]
    pub fail_on: FailOn,

    /// Run only these rule ids (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub only: Option<Vec<String>>,

    /// Skip these rule ids (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "IDS")]
    pub skip: Option<Vec<String>>,
}

#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the JSON report produced by `audit`
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Output file for the rendered report
    #[arg(short, long, default_value = "report.md", value_name = "FILE")]
    pub output: PathBuf,

    /// Rendered format
    #[arg(long, value_enum, default_value = "markdown")]
    pub format: RenderFormat,
}

#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// Repository in owner/name form (falls back to GITHUB_OWNER/PROJECT_ITEM_KEY)
    #[arg(long, value_name = "OWNER/NAME")]
    pub repo: Option<String>,

    /// Pull request number to compute metrics for
    #[arg(long)]
    pub pr_number: u64,

    /// Workflow file or id whose runs gate the PR
    #[arg(long, default_value = "compliance.yml")]
    pub workflow: String,

    /// Path to the JSON report produced by `audit`
    #[arg(long, default_value = "report.json", value_name = "FILE")]
    pub report: PathBuf,

    /// Output path for the metrics JSON payload
    #[arg(long, default_value = "metrics/metrics.json", value_name = "FILE")]
    pub out_metrics: PathBuf,

    /// Output path for the appended metrics CSV row
    #[arg(long, default_value = "metrics/metrics.csv", value_name = "FILE")]
    pub out_csv: PathBuf,

    /// Output path for the trends JSON payload
    #[arg(long, default_value = "metrics/trends.json", value_name = "FILE")]
    pub out_trends: PathBuf,

    /// Generate fixed demo metrics without calling the GitHub API
    #[arg(long)]
    pub demo: bool,
}

#[derive(Args, Debug)]
pub struct PublishArgs {
    /// Project owner (org or user)
    #[arg(long, env = "GITHUB_OWNER")]
    pub owner: Option<String>,

    /// GitHub Project v2 number
    #[arg(long, env = "GITHUB_PROJECT_NUMBER", default_value_t = 1)]
    pub project_number: u64,

    /// Logical key identifying the project item (e.g. "repo:acme-api")
    #[arg(long, env = "PROJECT_ITEM_KEY")]
    pub item_key: Option<String>,

    /// Path to the JSON report produced by `audit`
    #[arg(long, default_value = "report.json", value_name = "FILE")]
    pub report: PathBuf,

    /// Optional JSON file carrying trend information
    #[arg(long, value_name = "FILE")]
    pub trend: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fail_on_thresholds() {
        assert_eq!(FailOn::None.threshold(), None);
        assert_eq!(FailOn::Low.threshold(), Some(Severity::Low));
        assert_eq!(FailOn::Medium.threshold(), Some(Severity::Medium));
        assert_eq!(FailOn::High.threshold(), Some(Severity::High));
    }
}
