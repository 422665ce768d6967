//! Scope discovery and relevance matching for `AI_README.md` files.
//!
//! [`discover_scopes`] walks a repository tree for governing documentation
//! files and returns them as deterministically ordered [`ReadmeScope`]s;
//! [`relevant_scopes`] maps a set of changed paths onto that collection.

pub mod matcher;
pub mod paths;
mod walker;

use std::path::Path;

use tracing::{debug, instrument, warn};

use aireadme_shared::config::DiscoveryConfig;
use aireadme_shared::{AiReadmeError, ReadmeScope, Result};

pub use matcher::{MatchOptions, missing_paths, relevant_scopes};
pub use walker::DEFAULT_IGNORE_DIRS;

// ---------------------------------------------------------------------------
// Discovery options
// ---------------------------------------------------------------------------

/// Configuration for scope discovery.
#[derive(Debug, Clone)]
pub struct DiscoveryOptions {
    /// Extra directory names to skip, on top of [`DEFAULT_IGNORE_DIRS`].
    pub ignore_dirs: Vec<String>,
    /// Whether the walker follows symbolic links.
    pub follow_links: bool,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            ignore_dirs: Vec::new(),
            follow_links: true,
        }
    }
}

impl From<&DiscoveryConfig> for DiscoveryOptions {
    fn from(config: &DiscoveryConfig) -> Self {
        Self {
            ignore_dirs: config.ignore_dirs.clone(),
            follow_links: config.follow_links,
        }
    }
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Discover every `AI_README.md` scope under `root`.
///
/// The returned collection is sorted by `(depth ascending, directory
/// lexicographic ascending)`; this ordering is the sole source of
/// determinism for downstream tie-breaks. Per-file read failures are logged
/// and skipped. The only error is a root that does not resolve to a
/// directory.
#[instrument(skip_all, fields(root = %root.display()))]
pub async fn discover_scopes(root: &Path, opts: &DiscoveryOptions) -> Result<Vec<ReadmeScope>> {
    let meta = tokio::fs::metadata(root)
        .await
        .map_err(|_| AiReadmeError::Resolution {
            path: root.to_path_buf(),
        })?;
    if !meta.is_dir() {
        return Err(AiReadmeError::Resolution {
            path: root.to_path_buf(),
        });
    }

    // Stable baseline ordering before the semantic sort, so reads happen in
    // a reproducible order regardless of walk completion order.
    let mut candidates = walker::find_readme_files(root, opts);
    candidates.sort();

    let mut scopes = Vec::with_capacity(candidates.len());
    for absolute_path in candidates {
        let content = match tokio::fs::read_to_string(&absolute_path).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %absolute_path.display(), error = %e, "failed to read AI_README, skipping");
                continue;
            }
        };

        let absolute_dir = absolute_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        scopes.push(ReadmeScope {
            directory: paths::normalize_dir(root, &absolute_dir),
            depth: paths::path_depth(&absolute_dir),
            absolute_path,
            content,
        });
    }

    scopes.sort_by(|a, b| {
        a.depth
            .cmp(&b.depth)
            .then_with(|| a.directory.cmp(&b.directory))
    });

    debug!(count = scopes.len(), "discovered AI_README scopes");
    Ok(scopes)
}
