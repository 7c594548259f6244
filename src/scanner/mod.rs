//! Scanner module - tolerant file reading and repository walking
//!
//! Scanning rules re-read from disk on every invocation; nothing here is
//! cached or memoized, so repeated checks always reflect the current
//! file-system state.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::rules::RuleContext;

/// Read a file as a list of lines, tolerating absence and decoding errors.
///
/// A missing or unreadable file yields zero lines; invalid UTF-8 is replaced
/// rather than rejected. The read path itself never fails.
pub fn read_lines(path: &Path) -> Vec<String> {
    match fs::read(path) {
        Ok(bytes) => String::from_utf8_lossy(&bytes)
            .lines()
            .map(str::to_string)
            .collect(),
        Err(_) => Vec::new(),
    }
}

/// Walk all regular files under the context's repository root.
///
/// Skips `.git` and any directory the context marks as ignored. A
/// non-existent root yields an empty list. Entries come back in a stable
/// sorted order so scanning rules produce deterministic finding sequences.
pub fn walk_files(ctx: &RuleContext) -> Vec<PathBuf> {
    let root = ctx.repo_root();

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let path = entry.path();
            if path == root {
                return true;
            }
            if entry.file_type().is_dir() {
                if entry.file_name() == ".git" {
                    return false;
                }
                return !ctx.is_ignored(path);
            }
            true
        })
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .collect();

    files.sort();
    files
}
