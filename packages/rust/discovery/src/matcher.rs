//! Relevance matching between changed paths and discovered scopes.
//!
//! A scope is relevant to a changed path when its governed directory is a
//! path-prefix of the resolved change. Every matching ancestor is returned,
//! not just the nearest one, so callers see the full governing chain.

use std::path::Path;

use tracing::warn;

use aireadme_shared::ReadmeScope;
use aireadme_shared::config::DefaultsConfig;

use crate::paths::{dir_prefix, resolve_changed_path};

/// Policy knobs for the matcher.
#[derive(Debug, Clone)]
pub struct MatchOptions {
    /// When no scope matches any changed path, return the single
    /// highest-priority scope instead of nothing. On by default; this is a
    /// policy choice, not a contract.
    pub fallback_to_root_scope: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            fallback_to_root_scope: true,
        }
    }
}

impl From<&DefaultsConfig> for MatchOptions {
    fn from(defaults: &DefaultsConfig) -> Self {
        Self {
            fallback_to_root_scope: defaults.fallback_to_root_scope,
        }
    }
}

/// Prefix a changed path must start with to fall under `scope`.
fn scope_prefix(scope: &ReadmeScope) -> String {
    let dir = scope.absolute_path.parent().unwrap_or(Path::new(""));
    dir_prefix(dir)
}

/// Select the scopes relevant to `changed_paths`, ordered by depth ascending.
///
/// An empty change set means a global request: every scope is relevant.
/// Scopes are identified by `absolute_path`; a scope matching several
/// changed paths is returned once. When nothing matches, the fallback policy
/// in `opts` decides between the first (lowest-depth) scope and an empty set.
pub fn relevant_scopes<'a>(
    scopes: &'a [ReadmeScope],
    changed_paths: &[String],
    root: &Path,
    opts: &MatchOptions,
) -> Vec<&'a ReadmeScope> {
    if changed_paths.is_empty() {
        return scopes.iter().collect();
    }

    let resolved: Vec<String> = changed_paths
        .iter()
        .map(|changed| resolve_changed_path(root, changed))
        .collect();

    // Iterating scopes on the outside yields each scope at most once, so the
    // absolute-path identity needs no separate dedup set.
    let mut relevant: Vec<&ReadmeScope> = scopes
        .iter()
        .filter(|scope| {
            let prefix = scope_prefix(scope);
            resolved.iter().any(|changed| changed.starts_with(&prefix))
        })
        .collect();

    if relevant.is_empty() {
        warn!("no scoped AI_README.md matched the changed paths, falling back to repository-level guidance");
        if opts.fallback_to_root_scope {
            return scopes.first().into_iter().collect();
        }
        return Vec::new();
    }

    relevant.sort_by_key(|scope| scope.depth);
    relevant
}

/// Changed paths not covered by any scope in the full discovered list.
/// Independent of the matcher's fallback.
pub fn missing_paths(scopes: &[ReadmeScope], changed_paths: &[String], root: &Path) -> Vec<String> {
    changed_paths
        .iter()
        .filter(|changed| {
            let resolved = resolve_changed_path(root, changed);
            !scopes
                .iter()
                .any(|scope| resolved.starts_with(&scope_prefix(scope)))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scope(root: &str, directory: &str) -> ReadmeScope {
        let absolute_dir = if directory == "." {
            PathBuf::from(root)
        } else {
            PathBuf::from(root).join(directory)
        };
        ReadmeScope {
            absolute_path: absolute_dir.join("AI_README.md"),
            directory: directory.to_string(),
            depth: absolute_dir.components().count(),
            content: format!("# {directory}\n"),
        }
    }

    fn fixture() -> Vec<ReadmeScope> {
        // Already in discovery order: depth asc, directory asc.
        vec![
            scope("/repo", "."),
            scope("/repo", "apps/web"),
            scope("/repo", "packages/ui"),
        ]
    }

    #[test]
    fn empty_change_set_returns_all_scopes() {
        let scopes = fixture();
        let relevant = relevant_scopes(&scopes, &[], Path::new("/repo"), &MatchOptions::default());
        assert_eq!(relevant.len(), 3);
    }

    #[test]
    fn nested_change_matches_every_ancestor_scope() {
        let scopes = fixture();
        let changed = vec!["apps/web/src/index.ts".to_string()];
        let relevant =
            relevant_scopes(&scopes, &changed, Path::new("/repo"), &MatchOptions::default());
        let dirs: Vec<_> = relevant.iter().map(|s| s.directory.as_str()).collect();
        assert_eq!(dirs, vec![".", "apps/web"]);
    }

    #[test]
    fn scope_matching_several_changes_counts_once() {
        let scopes = fixture();
        let changed = vec![
            "apps/web/src/a.ts".to_string(),
            "apps/web/src/b.ts".to_string(),
        ];
        let relevant =
            relevant_scopes(&scopes, &changed, Path::new("/repo"), &MatchOptions::default());
        let web_hits = relevant
            .iter()
            .filter(|s| s.directory == "apps/web")
            .count();
        assert_eq!(web_hits, 1);
    }

    #[test]
    fn sibling_name_prefix_does_not_match() {
        let scopes = vec![scope("/repo", "apps/web")];
        let changed = vec!["apps/web2/src/index.ts".to_string()];
        let relevant =
            relevant_scopes(&scopes, &changed, Path::new("/repo"), &MatchOptions::default());
        // Nothing matches, so the fallback hands back the first scope.
        assert_eq!(relevant.len(), 1);
        assert_eq!(relevant[0].directory, "apps/web");
    }

    #[test]
    fn fallback_can_be_disabled() {
        let scopes = fixture();
        let changed = vec!["/outside/elsewhere.rs".to_string()];
        let opts = MatchOptions {
            fallback_to_root_scope: false,
        };
        let relevant = relevant_scopes(&scopes, &changed, Path::new("/repo"), &opts);
        assert!(relevant.is_empty());
    }

    #[test]
    fn missing_paths_are_computed_against_the_full_list() {
        let scopes = vec![scope("/repo", "apps/web")];
        let changed = vec![
            "apps/web/src/index.ts".to_string(),
            "apps/api/server.ts".to_string(),
        ];
        let missing = missing_paths(&scopes, &changed, Path::new("/repo"));
        assert_eq!(missing, vec!["apps/api/server.ts".to_string()]);
    }

    #[test]
    fn dot_segments_do_not_defeat_coverage() {
        let scopes = vec![scope("/repo", "apps/web")];
        let changed = vec![
            "./apps/web/src/index.ts".to_string(),
            "apps/api/../web/src/other.ts".to_string(),
        ];

        let missing = missing_paths(&scopes, &changed, Path::new("/repo"));
        assert_eq!(missing, Vec::<String>::new());

        let relevant =
            relevant_scopes(&scopes, &changed, Path::new("/repo"), &MatchOptions::default());
        let dirs: Vec<_> = relevant.iter().map(|s| s.directory.as_str()).collect();
        assert_eq!(dirs, vec!["apps/web"]);
    }

    #[test]
    fn missing_paths_preserve_caller_spelling() {
        let scopes = vec![scope("/repo", "apps/web")];
        let changed = vec!["./deep/../unknown/file.rs".to_string()];
        let missing = missing_paths(&scopes, &changed, Path::new("/repo"));
        // Uncovered even after folding, reported exactly as the caller
        // spelled it.
        assert_eq!(missing, changed);
    }
}
