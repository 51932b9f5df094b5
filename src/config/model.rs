//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};

/// Configuration for a proofwatch run.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // =========================================================================
    // Marker tracking
    // =========================================================================
    /// Declaration-introducing keywords, in match priority order.
    #[serde(default = "default_marker_keywords")]
    pub marker_keywords: Vec<String>,

    /// Incomplete-proof placeholder token.
    #[serde(default = "default_marker_token")]
    pub marker_token: String,

    /// Line-comment opener of the target language.
    #[serde(default = "default_comment_opener")]
    pub comment_opener: String,

    /// Declaration headers are cut at this operator in reports.
    #[serde(default = "default_definition_operator")]
    pub definition_operator: String,

    /// Extension of tracked files (no leading dot).
    #[serde(default = "default_target_extension")]
    pub target_extension: String,

    // =========================================================================
    // Summary generation
    // =========================================================================
    /// Diffs longer than this many characters are truncated before summarizing.
    #[serde(default = "default_max_diff_chars")]
    pub max_diff_chars: usize,

    /// Model identifier handed to the text generator.
    #[serde(default = "default_model")]
    pub model: String,

    /// Command template for the text generator; `{model}` is substituted and
    /// the prompt is written to stdin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generator_command: Option<String>,

    /// Seconds before a generator command is killed.
    #[serde(default = "default_generator_timeout_seconds")]
    pub generator_timeout_seconds: u64,

    /// Optional style guide checked against the diff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_guide_path: Option<String>,

    // =========================================================================
    // Forge
    // =========================================================================
    /// Label of open issues that track individual markers.
    #[serde(default = "default_issue_label")]
    pub issue_label: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            marker_keywords: default_marker_keywords(),
            marker_token: default_marker_token(),
            comment_opener: default_comment_opener(),
            definition_operator: default_definition_operator(),
            target_extension: default_target_extension(),
            max_diff_chars: default_max_diff_chars(),
            model: default_model(),
            generator_command: None,
            generator_timeout_seconds: default_generator_timeout_seconds(),
            style_guide_path: None,
            issue_label: default_issue_label(),
        }
    }
}
