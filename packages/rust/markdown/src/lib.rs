//! Section-addressable editing of `AI_README.md` documents.
//!
//! A document is treated as an optional top-level `# Title` line followed by
//! zero or more `## Section` blocks, each running until the next level-2
//! heading or end of document. [`upsert_section`] replaces or inserts one
//! section while preserving everything outside the edited span byte-for-byte.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Maximum character length of a scope content preview.
pub const PREVIEW_MAX_CHARS: usize = 240;

/// Matches `## Section Title` lines anywhere in a document.
static SECTION_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##\s+(.*)$").expect("section heading regex"));

// ---------------------------------------------------------------------------
// Upsert
// ---------------------------------------------------------------------------

/// Result of a section upsert.
#[derive(Debug, Clone)]
pub struct UpsertOutcome {
    /// The rewritten document.
    pub content: String,
    /// Whether the editor changed the document. True in every branch; the
    /// no-op determination belongs to the caller.
    pub updated: bool,
}

/// Insert or replace the section titled `section` with `body`.
///
/// The body is trimmed of trailing whitespace and padded with exactly two
/// newlines, guaranteeing one blank line before whatever follows. Section
/// titles compare case-insensitively. An empty document becomes a fresh one
/// titled after the section itself; callers wanting a distinct top-level
/// headline run [`ensure_headline`] afterwards.
pub fn upsert_section(content: &str, section: &str, body: &str) -> UpsertOutcome {
    let normalized_body = format!("{}\n\n", body.trim_end());

    if content.trim().is_empty() {
        debug!(section, "seeding empty document");
        return UpsertOutcome {
            content: format!("# {section}\n\n{normalized_body}"),
            updated: true,
        };
    }

    // Every level-2 heading with its trimmed title and byte offset,
    // in order of appearance.
    let headings: Vec<(String, usize)> = SECTION_HEADING_RE
        .captures_iter(content)
        .map(|caps| {
            let whole = caps.get(0).expect("match group 0");
            (caps[1].trim().to_string(), whole.start())
        })
        .collect();

    let section_heading = format!("## {section}\n\n");

    if headings.is_empty() {
        return UpsertOutcome {
            content: format!("{}\n\n{section_heading}{normalized_body}", content.trim_end()),
            updated: true,
        };
    }

    let wanted = section.to_lowercase();
    for (index, (title, start)) in headings.iter().enumerate() {
        if title.to_lowercase() != wanted {
            continue;
        }

        // Replace from this heading up to the next one (or EOF). Text before
        // the span is untouched; text after only loses leading whitespace so
        // spacing stays normalized.
        let end = headings
            .get(index + 1)
            .map(|(_, next_start)| *next_start)
            .unwrap_or(content.len());
        let before = &content[..*start];
        let after = content[end..].trim_start();

        debug!(section, start, end, "replacing existing section");
        return UpsertOutcome {
            content: format!("{before}{section_heading}{normalized_body}{after}"),
            updated: true,
        };
    }

    // Headings exist but none match: append as a new trailing section.
    UpsertOutcome {
        content: format!("{}\n\n{section_heading}{normalized_body}", content.trim_end()),
        updated: true,
    }
}

// ---------------------------------------------------------------------------
// Changelog append
// ---------------------------------------------------------------------------

/// Result of a changelog append.
#[derive(Debug, Clone)]
pub struct ChangelogOutcome {
    /// The rewritten (or unchanged) document.
    pub content: String,
    /// False iff the summary was blank and the document was left alone.
    pub appended: bool,
}

/// Append `- {summary}` as a bullet under the changelog section `title`.
///
/// A blank summary is the one condition under which this declines to act.
pub fn append_changelog(content: &str, change_summary: &str, title: &str) -> ChangelogOutcome {
    let trimmed = change_summary.trim();
    if trimmed.is_empty() {
        return ChangelogOutcome {
            content: content.to_string(),
            appended: false,
        };
    }

    let outcome = upsert_section(content, title, &format!("- {trimmed}"));
    ChangelogOutcome {
        content: outcome.content,
        appended: true,
    }
}

// ---------------------------------------------------------------------------
// Headline guarantee
// ---------------------------------------------------------------------------

/// Ensure the document begins with a level-1 heading.
///
/// When it does not, a `# {headline}` line is synthesized and the previous
/// content is demoted beneath it. Runs once per write, after section upsert
/// and changelog append.
pub fn ensure_headline(content: &str, headline: &str) -> String {
    let trimmed = content.trim();
    if trimmed.starts_with("# ") {
        return content.to_string();
    }
    if trimmed.is_empty() {
        format!("# {headline}\n\n")
    } else {
        format!("# {headline}\n\n{trimmed}\n")
    }
}

// ---------------------------------------------------------------------------
// Preview
// ---------------------------------------------------------------------------

/// Collapse whitespace to single spaces and truncate to `max_chars`,
/// spending the final character on an ellipsis when truncating.
pub fn content_preview(content: &str, max_chars: usize) -> String {
    let compact = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() <= max_chars {
        return compact;
    }
    let mut preview: String = compact.chars().take(max_chars.saturating_sub(1)).collect();
    preview.push('…');
    preview
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
