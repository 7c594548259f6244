//! Error types for repoaudit
//!
//! The rule engine itself never surfaces these: rule faults are converted
//! into synthetic findings at the runner boundary. `AuditError` covers the
//! layers around the engine - report I/O, rendering, and the GitHub clients.

use thiserror::Error;

/// Main error type for repoaudit
#[derive(Error, Debug)]
pub enum AuditError {
    /// Failed to read a report or input file
    #[error("Failed to read '{path}': {source}")]
    FileRead {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write an output file
    #[error("Failed to write '{path}': {source}")]
    FileWrite {
        path: String,
        source: std::io::Error,
    },

    /// A report file did not contain the expected JSON payload
    #[error("Failed to parse report '{path}': {source}")]
    ReportParse {
        path: String,
        source: serde_json::Error,
    },

    /// A required environment variable is not set
    #[error("Environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// The GitHub API rejected a request
    #[error("GitHub API error: {0}")]
    GitHub(String),

    /// Transport-level HTTP failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// JSON serialization failure outside report parsing
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
