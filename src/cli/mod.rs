//! # CLI Module
//!
//! This module defines the command-line interface for repoaudit using `clap`.
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `audit` | Run the compliance rules and emit a JSON report |
//! | `render` | Render a JSON report to Markdown or CSV |
//! | `metrics` | Compute PR process metrics from a report and GitHub activity |
//! | `publish` | Publish a report summary to a GitHub Project |
//!
//! ## Global Options
//!
//! - `-v, --verbose` - Increase verbosity level (use multiple times: -v, -vv, -vvv)

pub mod commands;
pub mod exit_codes;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{AuditArgs, MetricsArgs, PublishArgs, RenderArgs};

/// repoaudit - Audit repositories against compliance heuristics
#[derive(Parser, Debug)]
#[command(name = "repoaudit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the compliance rules and emit a JSON report
    Audit(AuditArgs),

    /// Render a JSON report to Markdown or CSV
    Render(RenderArgs),

    /// Compute PR process metrics from a report and GitHub activity
    Metrics(MetricsArgs),

    /// Publish a report summary to a GitHub Project
    Publish(PublishArgs),
}
