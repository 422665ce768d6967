//! Path normalization helpers.
//!
//! Scope directories are identified by root-relative, slash-separated
//! strings so the same identifier works as a human-readable label and as the
//! key for ancestor matching, on every platform.

use std::path::{Component, Path, PathBuf};

/// Render a path with forward slashes regardless of platform.
pub fn slash_path(path: &Path) -> String {
    path.display().to_string().replace('\\', "/")
}

/// Root-relative, slash-normalized identifier for `absolute_dir`.
///
/// `"."` denotes the repository root itself. Pure; a directory outside the
/// root falls back to its absolute slash-normalized form.
pub fn normalize_dir(root: &Path, absolute_dir: &Path) -> String {
    match absolute_dir.strip_prefix(root) {
        Ok(relative) if relative.as_os_str().is_empty() => ".".to_string(),
        Ok(relative) => slash_path(relative),
        Err(_) => slash_path(absolute_dir),
    }
}

/// Count of path segments from the filesystem root to `absolute_dir`.
/// Lower depth ranks a scope closer to the repository root.
pub fn path_depth(absolute_dir: &Path) -> usize {
    absolute_dir.components().count()
}

/// Slash-normalized absolute directory with a trailing separator — the
/// prefix a changed path must start with to be governed by the directory.
/// The trailing separator keeps `apps/web2` from matching a scope at
/// `apps/web`.
pub fn dir_prefix(absolute_dir: &Path) -> String {
    let rendered = slash_path(absolute_dir);
    if rendered.ends_with('/') {
        rendered
    } else {
        format!("{rendered}/")
    }
}

/// Resolve a changed path against `root` to an absolute slash-normalized
/// string. Already-absolute paths are kept as given. `.` and `..` segments
/// are folded lexically so spellings like `./apps/web/x.ts` compare equal to
/// `apps/web/x.ts` in the prefix test.
pub fn resolve_changed_path(root: &Path, changed: &str) -> String {
    let path = Path::new(changed);
    let absolute: PathBuf = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    slash_path(&lexical_normalize(&absolute))
}

/// Fold `.` and `..` components without touching the filesystem.
/// `..` at the filesystem root is clamped, as `path.resolve` would.
fn lexical_normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(Component::ParentDir),
            },
            other => normalized.push(other),
        }
    }
    normalized
}
