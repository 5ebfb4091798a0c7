//! Source-file enumerator.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

/// Extensions scanned for `genstrings` when none are given.
pub const DEFAULT_EXTENSIONS: &[&str] = &["c", "m", "mm", "swift"];

/// Extensions handled by `ibtool`.
pub const INTERFACE_EXTENSIONS: &[&str] = &["xib", "nib", "storyboard"];

/// Recursively collects files under `root` whose extension is in
/// `extensions`, pruning any directory whose path contains one of the
/// `ignore_patterns` substrings (the whole subtree is skipped).
///
/// Ignore substrings apply to directory paths only; a file whose own name
/// happens to contain a pattern is still collected.
pub fn find_sources(root: &Path, extensions: &[String], ignore_patterns: &[String]) -> Vec<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_entry(|entry| {
            if !entry.file_type().is_dir() {
                return true;
            }
            let path = entry.path().to_string_lossy();
            let ignored = ignore_patterns
                .iter()
                .any(|pattern| path.contains(pattern.as_str()));
            if ignored {
                debug!(path = %entry.path().display(), "ignored path");
            }
            !ignored
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
        })
        .collect()
}
