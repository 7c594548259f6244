//! Static detection patterns shared by the scanning rules

use lazy_static::lazy_static;
use regex::Regex;

/// A secret-like key=value pattern.
///
/// Order matters: when several patterns match the same line, the first one
/// in this table is the one reported.
pub struct SecretPattern {
    /// Short label used in messages and finding metadata
    pub name: &'static str,
    pub regex: Regex,
}

lazy_static! {
    /// Secret assignment patterns, in reporting priority order.
    pub static ref SECRET_PATTERNS: Vec<SecretPattern> = vec![
        SecretPattern {
            name: "SECRET_KEY=",
            regex: Regex::new(r"(?i)SECRET_?KEY\s*=").unwrap(),
        },
        SecretPattern {
            name: "API_KEY=",
            regex: Regex::new(r"(?i)API_?KEY\s*=").unwrap(),
        },
        SecretPattern {
            name: "TOKEN=",
            regex: Regex::new(r"(?i)TOKEN\s*=").unwrap(),
        },
        SecretPattern {
            name: "PASSWORD=",
            regex: Regex::new(r"(?i)PASSWORD\s*=").unwrap(),
        },
        SecretPattern {
            name: "SECRET=",
            regex: Regex::new(r"(?i)SECRET\s*=").unwrap(),
        },
    ];

    /// Environment-lookup idioms across the ecosystems we scan.
    pub static ref ENV_LOOKUP: Regex = Regex::new(
        r"(?i)\bos\.environ\b|\benviron\[|\bos\.getenv\s*\(|\bgetenv\s*\(|\bprocess\.env\b|\bENV\[|\benv::var\b",
    )
    .unwrap();

    /// A build target label at column 0: `identifier:` made of letters,
    /// digits, `.`, `_`, `-`.
    pub static ref TARGET_LABEL: Regex = Regex::new(r"^([A-Za-z0-9._-]+):").unwrap();
}
