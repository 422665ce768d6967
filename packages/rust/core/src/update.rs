//! The `update_section` orchestrator: read-modify-write of one
//! `AI_README.md`, composing section upsert, headline guarantee, and
//! changelog append.

use std::io;

use tracing::{info, instrument};

use aireadme_markdown::{append_changelog, ensure_headline, upsert_section};
use aireadme_shared::{
    AI_README_FILENAME, AiReadmeError, AppConfig, DEFAULT_CHANGELOG_TITLE, DEFAULT_HEADLINE,
    Result, UpdateRequest, UpdateResponse,
};

use crate::validate;

/// Knobs for the update operation, merged from config.
#[derive(Debug, Clone)]
pub struct UpdateOptions {
    /// Headline used when the request carries none.
    pub default_headline: String,
    /// Title of the changelog section.
    pub changelog_title: String,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            default_headline: DEFAULT_HEADLINE.to_string(),
            changelog_title: DEFAULT_CHANGELOG_TITLE.to_string(),
        }
    }
}

impl From<&AppConfig> for UpdateOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            default_headline: config.defaults.headline.clone(),
            changelog_title: config.defaults.changelog_title.clone(),
        }
    }
}

/// Upsert a section of the `AI_README.md` in the requested directory,
/// creating the file (and directory) when absent.
///
/// The file on disk is the only durable state: it is re-read and re-parsed
/// on every call, and written back as one whole-file write. Concurrent
/// writers race with last-write-wins semantics.
#[instrument(skip_all, fields(target = %request.target_dir, section = %request.section))]
pub async fn update_section(
    request: &UpdateRequest,
    opts: &UpdateOptions,
) -> Result<UpdateResponse> {
    validate::update_request(request).map_err(validate::into_error)?;

    let target_dir = std::path::absolute(&request.target_dir)
        .map_err(|e| AiReadmeError::io(&request.target_dir, e))?;
    let file_path = target_dir.join(AI_README_FILENAME);

    // An existing-but-empty file counts as no prior content.
    let existing = match tokio::fs::read_to_string(&file_path).await {
        Ok(content) if content.is_empty() => None,
        Ok(content) => Some(content),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(AiReadmeError::io(&file_path, e)),
    };

    if existing.is_none() && request.require_existing {
        return Err(AiReadmeError::MissingReadme { path: target_dir });
    }

    let headline = request
        .headline
        .as_deref()
        .unwrap_or(&opts.default_headline);
    let seed = existing
        .clone()
        .unwrap_or_else(|| format!("# {headline}\n\n"));

    let outcome = upsert_section(&seed, &request.section, &request.body);
    let mut content = ensure_headline(&outcome.content, headline);

    let mut changelog_appended = false;
    if let Some(summary) = &request.change_summary {
        let changelog = append_changelog(&content, summary, &opts.changelog_title);
        content = changelog.content;
        changelog_appended = changelog.appended;
    }

    // The editor reports an update on every invocation, so this guard only
    // fires when a caller short-circuits the upsert.
    if !outcome.updated && !changelog_appended {
        return Ok(UpdateResponse {
            created: false,
            updated_sections: Vec::new(),
            changelog_appended: false,
            file_path,
        });
    }

    tokio::fs::create_dir_all(&target_dir)
        .await
        .map_err(|e| AiReadmeError::io(&target_dir, e))?;
    tokio::fs::write(&file_path, &content)
        .await
        .map_err(|e| AiReadmeError::io(&file_path, e))?;
    info!(path = %file_path.display(), created = existing.is_none(), "wrote AI_README");

    Ok(UpdateResponse {
        created: existing.is_none(),
        updated_sections: if outcome.updated {
            vec![request.section.clone()]
        } else {
            Vec::new()
        },
        changelog_appended,
        file_path,
    })
}
