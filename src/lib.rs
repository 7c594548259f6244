//! repoaudit Library
//!
//! This crate provides the core functionality for auditing repositories
//! against a small set of compliance heuristics: a fault-tolerant rule
//! engine producing an ordered, serializable findings report, plus the
//! rendering and GitHub publishing layers around it.

pub mod cli;
pub mod error;
pub mod metrics;
pub mod providers;
pub mod report;
pub mod rules;
pub mod scanner;

pub use error::AuditError;
pub use report::{AuditReport, ReportSummary};
pub use rules::{run_rules, AuditEngine, Finding, Rule, RuleContext, Severity};
