//! # Audit Result Structures
//!
//! This module defines the data structures for representing audit findings.
//!
//! ## Overview
//!
//! - [`Severity`] - Finding severity levels (Low, Medium, High)
//! - [`Finding`] - Individual audit finding with location and metadata
//!
//! ## Examples
//!
//! ### Creating Findings
//!
//! ```rust
//! use repoaudit::rules::{Finding, Severity};
//!
//! let finding = Finding::new("SEC001", Severity::High, "Possible exposed secret")
//!     .with_path("src/config.rs")
//!     .with_meta("line", 42);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Severity levels for audit findings.
///
/// Severities are totally ordered (`Low < Medium < High`) so callers can run
/// "at least X" threshold queries, e.g. for CI exit-code gating. The numeric
/// level is stable: Low = 1, Medium = 2, High = 3.
///
/// Serialized as exactly `"Low"`, `"Medium"`, or `"High"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Informational issues worth noting but not urgent.
    Low,
    /// Issues that should be addressed (e.g. missing build targets).
    Medium,
    /// Issues that must be resolved (e.g. exposed secrets).
    High,
}

impl Severity {
    /// Stable numeric level used for threshold comparisons.
    pub fn level(self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }

    /// The serialized string literal for this severity.
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single audit finding representing an issue detected in the repository.
///
/// Findings are produced fresh on every run and never mutated afterwards;
/// there is no identity beyond structural equality.
///
/// # Examples
///
/// ```rust
/// use repoaudit::rules::{Finding, Severity};
///
/// let finding = Finding::new("LIC001", Severity::High, "No license file found")
///     .with_path(".")
///     .with_meta("suggested_files", vec!["LICENSE", "COPYING"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable rule identifier (e.g. "SEC001"). Equals the id of the rule
    /// that produced the finding, including the synthetic crash finding.
    pub rule_id: String,

    /// Short human-readable message describing the finding. Never empty.
    pub message: String,

    /// Severity of the finding.
    pub severity: Severity,

    /// Optional path to the offending file or directory. Absent for
    /// repo-level findings.
    #[serde(default)]
    pub path: Option<String>,

    /// Open map of rule-specific diagnostic detail (matched line numbers,
    /// missing targets, suggested files, ...). Defaults to empty.
    #[serde(default)]
    pub meta: Map<String, Value>,
}

impl Finding {
    /// Create a new finding
    pub fn new(rule_id: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            severity,
            path: None,
            meta: Map::new(),
        }
    }

    /// Set the path
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Insert one metadata entry
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.meta.insert(key.into(), value.into());
        self
    }
}
