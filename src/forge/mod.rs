//! Forge collaborator: tracking issues and the pull-request summary comment.
//!
//! The summary comment carries a hidden HTML marker,
//! `<!-- gemini-pr-summary-<timestamp> -->`. Re-runs find the first comment
//! with such a marker and edit it instead of posting a duplicate.

mod comment;
mod gh;


use serde::Deserialize;

use crate::error::Result;

pub use comment::{
    COMMENT_IDENTIFIER, CommentAction, comment_identifier, is_summary_comment,
    upsert_summary_comment,
};
pub use gh::GhForge;

/// An open issue, as far as report linking is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub body: Option<String>,
}

/// An existing comment on the pull request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Comment {
    pub id: u64,
    #[serde(default)]
    pub body: String,
}

/// Title and description of the pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
}

/// Issue and comment operations on the forge hosting the pull request.
pub trait Forge {
    fn pull_request(&self) -> Result<PullRequest>;

    /// Open issues carrying `label`.
    fn list_open_issues(&self, label: &str) -> Result<Vec<Issue>>;

    /// Comments on the pull request, oldest first.
    fn list_comments(&self) -> Result<Vec<Comment>>;

    fn create_comment(&self, body: &str) -> Result<()>;

    fn edit_comment(&self, comment_id: u64, body: &str) -> Result<()>;
}
