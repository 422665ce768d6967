//! Request validation at the orchestrator boundary.
//!
//! Validation is transport-independent: whatever carried the request, the
//! orchestrators check it here and report field-level reasons.

use aireadme_shared::{AiReadmeError, GuidanceRequest, UpdateRequest};

/// One rejected field and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    /// Request field, in its wire spelling.
    pub field: &'static str,
    pub reason: String,
}

impl FieldIssue {
    fn blank(field: &'static str) -> Self {
        Self {
            field,
            reason: "must not be blank".to_string(),
        }
    }
}

/// Fold a non-empty issue list into a single descriptive error.
pub(crate) fn into_error(issues: Vec<FieldIssue>) -> AiReadmeError {
    let rendered: Vec<String> = issues
        .iter()
        .map(|issue| format!("{}: {}", issue.field, issue.reason))
        .collect();
    AiReadmeError::validation(rendered.join("; "))
}

/// Validate a guidance request.
pub fn guidance_request(request: &GuidanceRequest) -> Result<(), Vec<FieldIssue>> {
    let mut issues = Vec::new();

    if let Some(root) = &request.repository_root {
        if root.trim().is_empty() {
            issues.push(FieldIssue::blank("repositoryRoot"));
        }
    }
    if request.changed_paths.iter().any(|p| p.trim().is_empty()) {
        issues.push(FieldIssue {
            field: "changedPaths",
            reason: "entries must not be blank".to_string(),
        });
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}

/// Validate an update request.
pub fn update_request(request: &UpdateRequest) -> Result<(), Vec<FieldIssue>> {
    let mut issues = Vec::new();

    if request.target_dir.trim().is_empty() {
        issues.push(FieldIssue::blank("targetDir"));
    }
    if request.section.trim().is_empty() {
        issues.push(FieldIssue::blank("section"));
    }
    if request.body.trim().is_empty() {
        issues.push(FieldIssue::blank("body"));
    }

    if issues.is_empty() { Ok(()) } else { Err(issues) }
}
