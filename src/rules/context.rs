//! Rule context - the read-only scope rules are evaluated against

use std::path::{Component, Path, PathBuf};

/// Read-only snapshot of the audit scope, created once per invocation.
///
/// Construction performs no validation: a non-existent `repo_root` is legal
/// and simply yields "not found" findings from rules that look for specific
/// files. `ignore_dirs` is advisory - file-scanning rules honor it via
/// [`RuleContext::is_ignored`], the engine does not enforce it.
#[derive(Debug, Clone)]
pub struct RuleContext {
    repo_root: PathBuf,
    ignore_dirs: Vec<String>,
}

impl RuleContext {
    /// Create a context with an empty ignore list
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
            ignore_dirs: Vec::new(),
        }
    }

    /// Set the directory names or relative paths excluded from scanning
    pub fn with_ignore_dirs(mut self, ignore_dirs: Vec<String>) -> Self {
        self.ignore_dirs = ignore_dirs;
        self
    }

    /// Repository root this audit runs against
    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    /// Advisory list of ignored directory names or relative paths
    pub fn ignore_dirs(&self) -> &[String] {
        &self.ignore_dirs
    }

    /// Whether a path under the repository root falls inside an ignored
    /// directory. Entries match either a single path component by name
    /// (`node_modules`) or a relative path prefix (`vendor/third_party`).
    pub fn is_ignored(&self, path: &Path) -> bool {
        if self.ignore_dirs.is_empty() {
            return false;
        }

        let relative = path.strip_prefix(&self.repo_root).unwrap_or(path);

        for entry in &self.ignore_dirs {
            let entry_path = Path::new(entry);
            if entry_path.components().count() > 1 {
                if relative.starts_with(entry_path) {
                    return true;
                }
            } else if relative
                .components()
                .any(|c| matches!(c, Component::Normal(name) if name == entry.as_str()))
            {
                return true;
            }
        }

        false
    }
}
