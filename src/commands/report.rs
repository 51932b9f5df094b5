//! Implementation of the `proofwatch report` command.
//!
//! The marker analysis always runs over the whole diff. Only the text handed
//! to the generator is cut at `max_diff_chars`.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::cli::ReportArgs;
use crate::config::Config;
use crate::diff::{DiffAnalyzer, split_diff_into_files};
use crate::error::{ProofwatchError, Result};
use crate::forge::{
    CommentAction, Forge, GhForge, Issue, PullRequest, upsert_summary_comment,
};
use crate::report::{ReportInput, format_summary};
use crate::summarize::{CommandGenerator, Summarizer, TextGenerator};

use super::read_diff;

/// Everything the report needs besides the diff itself.
#[derive(Default)]
pub struct ReportSources<'a> {
    /// Generator for per-file summaries, overview and style check.
    pub generator: Option<&'a dyn TextGenerator>,
    pub pull_request: PullRequest,
    pub issues: Vec<Issue>,
    /// Pre-written overview, used when there is no generator.
    pub summary: Option<String>,
    /// Style guide contents, checked only with a generator.
    pub style_guide: Option<String>,
}

/// Execute the `proofwatch report` command.
pub fn cmd_report(config: &Config, args: &ReportArgs) -> Result<()> {
    let diff = read_diff(&args.diff)?;

    let forge = match (args.post, &args.repo, args.pr) {
        (true, Some(repo), Some(pr)) => Some(GhForge::new(repo.clone(), pr)?),
        (true, _, _) => {
            return Err(ProofwatchError::UserError(
                "--post requires --repo and --pr".to_string(),
            ));
        }
        _ => None,
    };

    let command_generator = if args.generate {
        let command = config.generator_command.clone().ok_or_else(|| {
            ProofwatchError::UserError(
                "--generate requires generator_command in the config or PROOFWATCH_GENERATOR_COMMAND"
                    .to_string(),
            )
        })?;
        Some(CommandGenerator::new(
            command,
            Duration::from_secs(config.generator_timeout_seconds),
        ))
    } else {
        None
    };

    let issues = match (&args.issues, &forge) {
        (Some(path), _) => read_issues(path)?,
        (None, Some(forge)) => open_issues(forge, &config.issue_label),
        (None, None) => Vec::new(),
    };

    let summary = match &args.summary {
        Some(path) => Some(read_text(path, "summary")?),
        None => None,
    };

    let style_guide = match (&config.style_guide_path, &command_generator) {
        (Some(path), Some(_)) => read_style_guide(Path::new(path)),
        _ => None,
    };

    let sources = ReportSources {
        generator: command_generator.as_ref().map(|g| g as &dyn TextGenerator),
        pull_request: PullRequest::default(),
        issues,
        summary,
        style_guide,
    };

    match &forge {
        Some(forge) => match post_report(config, forge, &diff, sources, Utc::now())? {
            CommentAction::Created => println!("Created summary comment."),
            CommentAction::Updated(id) => println!("Updated summary comment {}.", id),
        },
        None => println!("{}", build_report(config, &diff, &sources, Utc::now())?),
    }

    Ok(())
}

/// Open tracking issues carrying `label`.
///
/// A failed lookup is logged and yields no issues; the comment then has no
/// issue links.
pub fn open_issues(forge: &dyn Forge, label: &str) -> Vec<Issue> {
    match forge.list_open_issues(label) {
        Ok(issues) => issues,
        Err(e) => {
            tracing::warn!(label, error = %e, "could not list tracking issues");
            Vec::new()
        }
    }
}

/// Render the comment with the pull request's title and body, then upsert it.
pub fn post_report(
    config: &Config,
    forge: &dyn Forge,
    diff: &str,
    mut sources: ReportSources<'_>,
    now: DateTime<Utc>,
) -> Result<CommentAction> {
    sources.pull_request = forge.pull_request()?;
    let body = build_report(config, diff, &sources, now)?;
    upsert_summary_comment(forge, &body)
}

/// Analyze the diff and render the full summary comment.
pub fn build_report(
    config: &Config,
    diff: &str,
    sources: &ReportSources<'_>,
    now: DateTime<Utc>,
) -> Result<String> {
    let analysis = DiffAnalyzer::from_config(config)?.analyze(diff);

    let (generated_text, truncated) = truncate_chars(diff, config.max_diff_chars);
    if truncated {
        tracing::warn!(
            max_diff_chars = config.max_diff_chars,
            "diff truncated before generation"
        );
    }

    let mut per_file_summaries = Vec::new();
    let mut style_report = None;
    let ai_summary = match sources.generator {
        Some(generator) => {
            let summarizer = Summarizer::new(generator, config.model.clone());
            if let Some(guide) = &sources.style_guide {
                style_report = summarizer.check_style(generated_text, guide);
            }
            per_file_summaries = summarizer.summarize_files(&split_diff_into_files(generated_text));
            summarizer.synthesize(
                &per_file_summaries,
                &sources.pull_request.title,
                sources.pull_request.body.as_deref().unwrap_or_default(),
            )?
        }
        None => sources.summary.clone().unwrap_or_default(),
    };

    let input = ReportInput {
        ai_summary: ai_summary.trim(),
        analysis: &analysis,
        truncated,
        issues: &sources.issues,
        per_file_summaries: &per_file_summaries,
        style_report: style_report.as_deref(),
        marker_token: &config.marker_token,
    };

    Ok(format_summary(&input, now))
}

/// The first `max_chars` characters of `text`, and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}

fn read_text(path: &Path, what: &str) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| {
        ProofwatchError::UserError(format!(
            "failed to read {} '{}': {}",
            what,
            path.display(),
            e
        ))
    })
}

fn read_issues(path: &Path) -> Result<Vec<Issue>> {
    let content = read_text(path, "issues file")?;
    serde_json::from_str(&content).map_err(|e| {
        ProofwatchError::UserError(format!(
            "failed to parse issues file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// A missing style guide only disables the style check.
fn read_style_guide(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "style guide not readable");
            None
        }
    }
}
