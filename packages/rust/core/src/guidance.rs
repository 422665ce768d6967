//! The `collect_guidance` orchestrator: discover scopes, match them against
//! the changed paths, and aggregate the relevant guidance into one document.

use std::path::PathBuf;

use tracing::{debug, info, instrument};

use aireadme_discovery::{
    DiscoveryOptions, MatchOptions, discover_scopes, missing_paths, relevant_scopes,
};
use aireadme_markdown::{PREVIEW_MAX_CHARS, content_preview};
use aireadme_shared::{
    AiReadmeError, AppConfig, GuidanceRequest, GuidanceResponse, ReadmeScope, Result, ScopeSummary,
};

use crate::validate;

/// Knobs for the guidance operation, merged from config.
#[derive(Debug, Clone, Default)]
pub struct GuidanceOptions {
    pub discovery: DiscoveryOptions,
    pub matching: MatchOptions,
}

impl From<&AppConfig> for GuidanceOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            discovery: DiscoveryOptions::from(&config.discovery),
            matching: MatchOptions::from(&config.defaults),
        }
    }
}

/// Collect the guidance relevant to a set of changed paths.
///
/// A repository with no `AI_README.md` files is not an error: the response
/// is well-formed with empty scopes and every changed path missing.
#[instrument(skip_all, fields(changed = request.changed_paths.len()))]
pub async fn collect_guidance(
    request: &GuidanceRequest,
    opts: &GuidanceOptions,
) -> Result<GuidanceResponse> {
    validate::guidance_request(request).map_err(validate::into_error)?;

    let root = resolve_repository_root(request.repository_root.as_deref()).await?;
    debug!(root = %root.display(), "resolved repository root");

    let scopes = discover_scopes(&root, &opts.discovery).await?;
    if scopes.is_empty() {
        info!("no AI_README scopes discovered");
        return Ok(GuidanceResponse {
            scopes: Vec::new(),
            aggregated_guidance: String::new(),
            missing_paths: request.changed_paths.clone(),
        });
    }

    let relevant = relevant_scopes(&scopes, &request.changed_paths, &root, &opts.matching);
    info!(
        discovered = scopes.len(),
        relevant = relevant.len(),
        "matched AI_README scopes"
    );

    let summaries = relevant
        .iter()
        .map(|scope| ScopeSummary {
            directory: scope.directory.clone(),
            absolute_path: scope.absolute_path.clone(),
            content_preview: content_preview(&scope.content, PREVIEW_MAX_CHARS),
        })
        .collect();

    let aggregated_guidance = if request.raw {
        aggregate_raw(&relevant)
    } else {
        aggregate_wrapped(&relevant)
    };

    Ok(GuidanceResponse {
        scopes: summaries,
        aggregated_guidance,
        missing_paths: missing_paths(&scopes, &request.changed_paths, &root),
    })
}

/// Resolve the repository root: an explicit override must be an existing
/// directory; otherwise the current working directory is used.
async fn resolve_repository_root(requested: Option<&str>) -> Result<PathBuf> {
    match requested {
        Some(raw) => {
            let absolute =
                std::path::absolute(raw).map_err(|e| AiReadmeError::io(raw, e))?;
            let meta =
                tokio::fs::metadata(&absolute)
                    .await
                    .map_err(|_| AiReadmeError::Resolution {
                        path: absolute.clone(),
                    })?;
            if !meta.is_dir() {
                return Err(AiReadmeError::Resolution { path: absolute });
            }
            Ok(absolute)
        }
        None => std::env::current_dir().map_err(|e| AiReadmeError::io(".", e)),
    }
}

/// Raw concatenation: trimmed scope contents under `# Scope:` headers,
/// separated by horizontal rules.
fn aggregate_raw(scopes: &[&ReadmeScope]) -> String {
    scopes
        .iter()
        .map(|scope| format!("# Scope: {}\n\n{}", scope.directory, scope.content.trim()))
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

/// Wrapped presentation: an explanatory preamble plus per-scope subheadings.
fn aggregate_wrapped(scopes: &[&ReadmeScope]) -> String {
    let intro = [
        "## AI README Guidance",
        "",
        "The following guidance was automatically collected from AI_README.md files relevant to the requested paths.",
        "Use this information to understand project conventions before applying changes.",
    ]
    .join("\n");

    let mut parts = vec![intro, String::new()];
    parts.extend(scopes.iter().map(|scope| {
        format!("### Scope: `{}`\n\n{}", scope.directory, scope.content.trim())
    }));
    parts.join("\n")
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write_readme(dir: &Path, content: &str) {
        fs::create_dir_all(dir).expect("create dir");
        fs::write(dir.join("AI_README.md"), content).expect("write readme");
    }

    fn request_for(root: &Path, changed: &[&str]) -> GuidanceRequest {
        GuidanceRequest {
            changed_paths: changed.iter().map(|c| c.to_string()).collect(),
            repository_root: Some(root.display().to_string()),
            raw: false,
        }
    }

    #[tokio::test]
    async fn empty_repository_returns_well_formed_empty_response() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let request = request_for(tmp.path(), &["x.ts"]);

        let response = collect_guidance(&request, &GuidanceOptions::default())
            .await
            .expect("guidance");
        assert!(response.scopes.is_empty());
        assert_eq!(response.aggregated_guidance, "");
        assert_eq!(response.missing_paths, vec!["x.ts".to_string()]);
    }

    #[tokio::test]
    async fn changed_paths_select_governing_scopes() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write_readme(root, "# Root\n\nRepo-wide rules.\n");
        write_readme(&root.join("apps/web"), "# Web\n\nWeb rules.\n");
        write_readme(&root.join("apps/api"), "# Api\n\nApi rules.\n");

        let request = request_for(root, &["apps/web/src/index.ts"]);
        let response = collect_guidance(&request, &GuidanceOptions::default())
            .await
            .expect("guidance");

        let dirs: Vec<_> = response.scopes.iter().map(|s| s.directory.as_str()).collect();
        assert_eq!(dirs, vec![".", "apps/web"]);
        assert!(response.missing_paths.is_empty());
        assert!(response.aggregated_guidance.contains("## AI README Guidance"));
        assert!(response.aggregated_guidance.contains("### Scope: `apps/web`"));
        assert!(response.aggregated_guidance.contains("Web rules."));
        assert!(!response.aggregated_guidance.contains("Api rules."));
    }

    #[tokio::test]
    async fn uncovered_changed_paths_are_reported_missing() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write_readme(&root.join("apps/web"), "# Web\n");

        let request = request_for(root, &["apps/web/src/index.ts", "apps/api/server.ts"]);
        let response = collect_guidance(&request, &GuidanceOptions::default())
            .await
            .expect("guidance");

        assert_eq!(response.missing_paths, vec!["apps/api/server.ts".to_string()]);
    }

    #[tokio::test]
    async fn raw_mode_concatenates_with_rules() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write_readme(root, "# Root\n\nRepo-wide rules.\n");
        write_readme(&root.join("lib"), "# Lib\n\nLib rules.\n");

        let mut request = request_for(root, &[]);
        request.raw = true;
        let response = collect_guidance(&request, &GuidanceOptions::default())
            .await
            .expect("guidance");

        assert_eq!(
            response.aggregated_guidance,
            "# Scope: .\n\n# Root\n\nRepo-wide rules.\n\n---\n\n# Scope: lib\n\n# Lib\n\nLib rules."
        );
    }

    #[tokio::test]
    async fn empty_change_set_aggregates_every_scope() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write_readme(root, "# Root\n");
        write_readme(&root.join("a"), "# A\n");

        let request = request_for(root, &[]);
        let response = collect_guidance(&request, &GuidanceOptions::default())
            .await
            .expect("guidance");
        assert_eq!(response.scopes.len(), 2);
        assert!(response.missing_paths.is_empty());
    }

    #[tokio::test]
    async fn unmatched_changes_fall_back_to_root_scope() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write_readme(root, "# Root\n\nRepo-wide rules.\n");
        write_readme(&root.join("apps/web"), "# Web\n");

        // A change under the root would be covered by the root scope, so
        // point it outside the repository entirely.
        let request = request_for(root, &["/outside/file.rs"]);
        let response = collect_guidance(&request, &GuidanceOptions::default())
            .await
            .expect("guidance");

        assert_eq!(response.scopes.len(), 1);
        assert_eq!(response.scopes[0].directory, ".");
        assert_eq!(response.missing_paths, vec!["/outside/file.rs".to_string()]);
    }

    #[tokio::test]
    async fn scope_previews_are_bounded() {
        let tmp = tempfile::tempdir().expect("tempdir");
        let root = tmp.path();
        write_readme(root, &format!("# Root\n\n{}\n", "long text ".repeat(100)));

        let request = request_for(root, &[]);
        let response = collect_guidance(&request, &GuidanceOptions::default())
            .await
            .expect("guidance");
        let preview = &response.scopes[0].content_preview;
        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS);
        assert!(preview.ends_with('…'));
        assert!(!preview.contains('\n'));
    }

    #[tokio::test]
    async fn bad_root_override_fails_resolution() {
        let request = GuidanceRequest {
            repository_root: Some("/nonexistent/repo".into()),
            ..GuidanceRequest::default()
        };
        let result = collect_guidance(&request, &GuidanceOptions::default()).await;
        assert!(matches!(result, Err(AiReadmeError::Resolution { .. })));
    }
}
