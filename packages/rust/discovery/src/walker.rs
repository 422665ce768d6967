//! Filesystem collaborator: gitignore-aware walk for `AI_README.md` files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::warn;

use aireadme_shared::AI_README_FILENAME;

use crate::DiscoveryOptions;

/// Directory names always skipped: version-control metadata, dependency
/// trees, and common build outputs.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "target",
    "dist",
    "build",
    ".next",
    ".turbo",
];

/// Collect absolute paths of all `AI_README.md` files under `root`.
///
/// Honors `.gitignore` rules, skips hidden entries and the ignore-dir set.
/// Unreadable entries are logged and skipped; the walk itself never fails.
pub(crate) fn find_readme_files(root: &Path, opts: &DiscoveryOptions) -> Vec<PathBuf> {
    let skip: HashSet<String> = DEFAULT_IGNORE_DIRS
        .iter()
        .map(|name| name.to_string())
        .chain(opts.ignore_dirs.iter().cloned())
        .collect();

    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .follow_links(opts.follow_links);
    builder.filter_entry(move |entry| {
        let is_dir = entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false);
        if is_dir {
            if let Some(name) = entry.file_name().to_str() {
                return !skip.contains(name);
            }
        }
        true
    });

    let mut files = Vec::new();
    for result in builder.build() {
        match result {
            Ok(entry) => {
                let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
                if is_file && entry.file_name() == std::ffi::OsStr::new(AI_README_FILENAME) {
                    files.push(entry.into_path());
                }
            }
            Err(e) => warn!(error = %e, "failed to read directory entry"),
        }
    }
    files
}
