//! Find-and-update of the summary comment.

use chrono::{DateTime, Utc};

use super::Forge;
use crate::error::Result;

/// Identifier template; `{{timestamp}}` is replaced per run.
pub const COMMENT_IDENTIFIER: &str = "<!-- gemini-pr-summary-{{timestamp}} -->";

const IDENTIFIER_PREFIX: &str = "<!-- gemini-pr-summary-";
const IDENTIFIER_SUFFIX: &str = " -->";

/// What `upsert_summary_comment` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentAction {
    Created,
    Updated(u64),
}

/// The identifier for a comment written at `now`.
pub fn comment_identifier(now: DateTime<Utc>) -> String {
    COMMENT_IDENTIFIER.replace(
        "{{timestamp}}",
        &now.format("%Y-%m-%d-%H-%M-%S").to_string(),
    )
}

/// True if `body` contains a summary comment identifier.
///
/// The timestamp may be anything, but the identifier must close on the line
/// it opens.
pub fn is_summary_comment(body: &str) -> bool {
    body.match_indices(IDENTIFIER_PREFIX).any(|(pos, _)| {
        let rest = &body[pos + IDENTIFIER_PREFIX.len()..];
        let line = rest.split('\n').next().unwrap_or_default();
        line.contains(IDENTIFIER_SUFFIX)
    })
}

/// Edit the first existing summary comment, or create one.
pub fn upsert_summary_comment(forge: &dyn Forge, body: &str) -> Result<CommentAction> {
    let existing = forge
        .list_comments()?
        .into_iter()
        .find(|c| is_summary_comment(&c.body));

    match existing {
        Some(comment) => {
            forge.edit_comment(comment.id, body)?;
            tracing::info!(comment_id = comment.id, "updated existing comment");
            Ok(CommentAction::Updated(comment.id))
        }
        None => {
            forge.create_comment(body)?;
            tracing::info!("created a new comment");
            Ok(CommentAction::Created)
        }
    }
}
