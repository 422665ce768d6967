//! Core domain types for aireadme.
//!
//! Request/response structs serialize as camelCase JSON so that output is
//! drop-in compatible with other tooling speaking the same shapes.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File name of a governing documentation file.
pub const AI_README_FILENAME: &str = "AI_README.md";

/// Headline used when creating a file without an explicit one.
pub const DEFAULT_HEADLINE: &str = "AI README: Project Index & Conventions";

/// Default title of the changelog section.
pub const DEFAULT_CHANGELOG_TITLE: &str = "Changelog";

// ---------------------------------------------------------------------------
// ReadmeScope
// ---------------------------------------------------------------------------

/// One governing `AI_README.md` file discovered in a repository tree.
///
/// Scopes are created fresh on every discovery call and discarded when the
/// request completes; the file on disk is the only durable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadmeScope {
    /// Absolute path to the `AI_README.md` file. Unique per scope.
    pub absolute_path: PathBuf,
    /// Root-relative, slash-normalized path of the governed directory.
    /// `"."` for the repository root, `"apps/frontend"` for nested scopes.
    pub directory: String,
    /// Raw file contents at discovery time (immutable snapshot).
    pub content: String,
    /// Count of path segments from the filesystem root to the governed
    /// directory. Lower values rank closer to the repository root.
    pub depth: usize,
}

// ---------------------------------------------------------------------------
// Guidance request/response
// ---------------------------------------------------------------------------

/// Query: collect guidance relevant to a set of changed paths.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuidanceRequest {
    /// Absolute or root-relative file paths that triggered the request.
    /// Empty means "global": every discovered scope is relevant.
    pub changed_paths: Vec<String>,
    /// Optional repository root override. Defaults to the working directory.
    pub repository_root: Option<String>,
    /// Return raw markdown bodies instead of the wrapped presentation.
    pub raw: bool,
}

/// Bounded summary of one matched scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScopeSummary {
    pub directory: String,
    pub absolute_path: PathBuf,
    pub content_preview: String,
}

/// Response to a guidance query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceResponse {
    /// Matched scopes, highest-priority (lowest depth) first.
    pub scopes: Vec<ScopeSummary>,
    /// Concatenated guidance text from the matched scopes.
    pub aggregated_guidance: String,
    /// Changed paths that no discovered scope covers.
    pub missing_paths: Vec<String>,
}

// ---------------------------------------------------------------------------
// Update request/response
// ---------------------------------------------------------------------------

/// Command: upsert a section of the `AI_README.md` in a target directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateRequest {
    /// Directory containing the `AI_README.md` to update or create.
    pub target_dir: String,
    /// Title of the level-2 section to upsert (matched case-insensitively).
    pub section: String,
    /// Markdown body that should replace or populate the section.
    pub body: String,
    /// Optional headline used for the top-level heading when creating.
    pub headline: Option<String>,
    /// Optional change summary appended as a changelog bullet.
    pub change_summary: Option<String>,
    /// When true, fail if the target `AI_README.md` does not already exist.
    pub require_existing: bool,
}

/// Response to an update command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    /// True iff no file existed before this call.
    pub created: bool,
    /// Titles of sections the editor touched.
    pub updated_sections: Vec<String>,
    /// Whether a changelog bullet was appended.
    pub changelog_appended: bool,
    /// Path of the file that was written (or would have been).
    pub file_path: PathBuf,
}
