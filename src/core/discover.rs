//! Source file discovery.
//!
//! Walks a directory tree and yields the files whose path, relative to the
//! root and written with `/` separators, matches a glob pattern.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::core::error::ProjectError;
use crate::core::registry::FileInfo;

/// `*` and `?` may cross directory boundaries, so `*.v` matches at any depth.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// A restartable walk over the files of one directory tree.
#[derive(Debug, Clone)]
pub struct FileDiscoverer {
    root: PathBuf,
    pattern: Pattern,
}

impl FileDiscoverer {
    /// Create a discoverer for `root`, which must be an existing directory.
    pub fn new(root: impl Into<PathBuf>, pattern: &str) -> Result<Self, ProjectError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ProjectError::MissingFile { path: root });
        }

        let normalized = normalize_separators(pattern);
        let anchored = normalized.strip_prefix("./").unwrap_or(&normalized);
        let pattern = Pattern::new(anchored).map_err(|e| ProjectError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        })?;

        Ok(FileDiscoverer { root, pattern })
    }

    /// The directory being walked.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the tree and yield matching files.
    ///
    /// Order is unspecified. Each call starts a fresh walk.
    pub fn files(&self) -> impl Iterator<Item = FileInfo> + '_ {
        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!("skipping unreadable entry: {}", e);
                    None
                }
            })
            // Follows symlinks, so linked source files are kept
            .filter(|entry| entry.path().is_file())
            .filter(move |entry| self.matches(entry.path()))
            .map(|entry| FileInfo::from_path(entry.into_path()))
    }

    /// Check a path under the root against the pattern.
    pub fn matches(&self, path: &Path) -> bool {
        let Ok(relative) = path.strip_prefix(&self.root) else {
            return false;
        };
        let relative = normalize_separators(&relative.to_string_lossy());
        self.pattern.matches_with(&relative, MATCH_OPTIONS)
    }
}

/// Rewrite `\` as `/` so patterns behave the same on every platform.
///
/// Neither character is legal inside a Windows file name, so the rewrite
/// cannot merge two distinct paths.
fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Discover all files under `root` matching `pattern`.
pub fn discover(root: &Path, pattern: &str) -> Result<Vec<FileInfo>, ProjectError> {
    let discoverer = FileDiscoverer::new(root, pattern)?;
    let files: Vec<_> = discoverer.files().collect();
    tracing::debug!(
        "found {} file(s) matching `{}` under {}",
        files.len(),
        pattern,
        root.display()
    );
    Ok(files)
}
