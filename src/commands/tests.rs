//! Tests for command implementations.

use std::cell::RefCell;
use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use super::{
    ReportSources, build_report, open_issues, post_report, read_diff, run_analyze, run_split,
    truncate_chars,
};
use crate::cli::{AnalyzeArgs, OutputFormat};
use crate::config::Config;
use crate::error::{ProofwatchError, Result};
use crate::forge::{Comment, CommentAction, Forge, Issue, PullRequest};
use crate::summarize::TextGenerator;
use crate::test_support::{commit_file, create_test_repo};

const LEAN_DIFF: &str = r#"diff --git a/Foo.lean b/Foo.lean
index 1111111..2222222 100644
--- a/Foo.lean
+++ b/Foo.lean
@@ -1,3 +1,4 @@
 theorem foo : True := by
-  sorry
+  trivial
+theorem bar : 1 = 1 := by sorry
 end
"#;

/// Replies in order, recording prompts.
struct QueueGenerator {
    replies: RefCell<Vec<Result<String>>>,
    prompts: RefCell<Vec<String>>,
}

impl QueueGenerator {
    fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: RefCell::new(replies.into_iter().rev().collect()),
            prompts: RefCell::new(Vec::new()),
        }
    }
}

impl TextGenerator for QueueGenerator {
    fn generate(&self, prompt: &str, _model: &str) -> Result<String> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.replies
            .borrow_mut()
            .pop()
            .unwrap_or_else(|| Err(ProofwatchError::GeneratorError("no reply left".into())))
    }
}

/// Forge whose issue listing always fails; comment writes are recorded.
#[derive(Default)]
struct IssuesUnavailableForge {
    created: RefCell<Vec<String>>,
}

impl Forge for IssuesUnavailableForge {
    fn pull_request(&self) -> Result<PullRequest> {
        Ok(PullRequest {
            title: "Prove bar".to_string(),
            body: None,
        })
    }

    fn list_open_issues(&self, _label: &str) -> Result<Vec<Issue>> {
        Err(ProofwatchError::ForgeError(
            "gh issue list failed (exit code 1): HTTP 403".to_string(),
        ))
    }

    fn list_comments(&self) -> Result<Vec<Comment>> {
        Ok(Vec::new())
    }

    fn create_comment(&self, body: &str) -> Result<()> {
        self.created.borrow_mut().push(body.to_string());
        Ok(())
    }

    fn edit_comment(&self, _comment_id: u64, _body: &str) -> Result<()> {
        Ok(())
    }
}

fn analyze_args(format: OutputFormat) -> AnalyzeArgs {
    AnalyzeArgs {
        diff: None,
        base: None,
        keywords: Vec::new(),
        extension: None,
        format,
    }
}

fn write_diff(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_read_diff_missing_is_user_error() {
    let temp = TempDir::new().unwrap();
    let err = read_diff(&temp.path().join("pr.diff")).unwrap_err();
    assert!(matches!(err, ProofwatchError::UserError(_)));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_analyze_reads_default_diff_path() {
    let temp = TempDir::new().unwrap();
    write_diff(&temp, "pr.diff", LEAN_DIFF);

    let output = run_analyze(&Config::default(), &analyze_args(OutputFormat::Text), temp.path())
        .unwrap();

    assert!(output.contains("Files changed: 1"));
    assert!(output.contains("Added (1):"));
    assert!(output.contains("Removed (1):"));
}

#[test]
fn test_analyze_json_output() {
    let temp = TempDir::new().unwrap();
    write_diff(&temp, "changes.diff", LEAN_DIFF);
    let mut args = analyze_args(OutputFormat::Json);
    args.diff = Some(PathBuf::from("changes.diff"));

    let output = run_analyze(&Config::default(), &args, temp.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["stats"]["files_changed"], 1);
    assert_eq!(value["stats"]["lines_added"], 2);
    assert_eq!(value["stats"]["lines_removed"], 1);
    assert_eq!(value["markers"]["added"][0], "`theorem bar : 1 = 1` in `Foo.lean`");
    assert_eq!(
        value["markers"]["removed"][0],
        "`theorem foo : True` in `Foo.lean`"
    );
}

#[test]
fn test_analyze_markdown_output() {
    let temp = TempDir::new().unwrap();
    write_diff(&temp, "pr.diff", LEAN_DIFF);

    let output =
        run_analyze(&Config::default(), &analyze_args(OutputFormat::Markdown), temp.path())
            .unwrap();

    assert!(output.starts_with("**Analysis of Changes**"));
    assert!(output.contains("**`sorry` Tracking**"));
}

#[test]
fn test_analyze_keyword_override_restricts_declarations() {
    let temp = TempDir::new().unwrap();
    write_diff(&temp, "pr.diff", LEAN_DIFF);
    let mut args = analyze_args(OutputFormat::Json);
    args.keywords = vec!["lemma".to_string()];

    let output = run_analyze(&Config::default(), &args, temp.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["markers"]["added"].as_array().unwrap().len(), 0);
    assert_eq!(value["markers"]["removed"].as_array().unwrap().len(), 0);
}

#[test]
fn test_analyze_rejects_dotted_extension() {
    let temp = TempDir::new().unwrap();
    write_diff(&temp, "pr.diff", LEAN_DIFF);
    let mut args = analyze_args(OutputFormat::Text);
    args.extension = Some(".lean".to_string());

    let err = run_analyze(&Config::default(), &args, temp.path()).unwrap_err();
    assert!(err.to_string().contains("leading dot"));
}

#[test]
fn test_analyze_against_base_revision() {
    let repo = create_test_repo();
    commit_file(repo.path(), "Foo.lean", "theorem foo : True := by\n  trivial\n");
    crate::git::run_git(repo.path(), &["branch", "base"]).unwrap();
    commit_file(
        repo.path(),
        "Foo.lean",
        "theorem foo : True := by\n  trivial\ntheorem bar : 1 = 1 := by sorry\n",
    );

    let mut args = analyze_args(OutputFormat::Json);
    args.base = Some("base".to_string());
    let output = run_analyze(&Config::default(), &args, repo.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["markers"]["added"][0], "`theorem bar : 1 = 1` in `Foo.lean`");
}

#[test]
fn test_split_lists_sections() {
    let temp = TempDir::new().unwrap();
    let diff = format!(
        "{}diff --git a/README.md b/README.md\n--- a/README.md\n+++ b/README.md\n@@ -1 +1 @@\n-a\n+b\n",
        LEAN_DIFF
    );
    let path = write_diff(&temp, "pr.diff", &diff);

    let output = run_split(&path).unwrap();

    let rows: Vec<&str> = output.lines().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows[0].starts_with("Foo.lean: "));
    assert_eq!(rows[1], "README.md: 6 lines");
}

#[test]
fn test_split_empty_diff() {
    let temp = TempDir::new().unwrap();
    let path = write_diff(&temp, "pr.diff", "");
    assert_eq!(run_split(&path).unwrap(), "No file sections found.\n");
}

#[test]
fn test_truncate_chars_respects_char_boundaries() {
    assert_eq!(truncate_chars("héllo", 2), ("hé", true));
    assert_eq!(truncate_chars("héllo", 5), ("héllo", false));
    assert_eq!(truncate_chars("", 3), ("", false));
}

#[test]
fn test_build_report_without_generator_uses_given_summary() {
    let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
    let sources = ReportSources {
        summary: Some("Hand-written overview.\n".to_string()),
        issues: vec![Issue {
            number: 12,
            body: Some("<!-- sorry-tracker-id: foo@Foo.lean -->".to_string()),
        }],
        ..Default::default()
    };

    let body = build_report(&Config::default(), LEAN_DIFF, &sources, now).unwrap();

    assert!(body.contains("<!-- gemini-pr-summary-2025-01-02-03-04-05 -->"));
    assert!(body.contains("Hand-written overview.\n"));
    assert!(body.contains("✅ **Removed:** 1 `sorry`(s)"));
    assert!(body.contains("❌ **Added:** 1 `sorry`(s)"));
    assert!(!body.contains("Per-File Summaries"));
    assert!(!body.contains("truncated"));
}

#[test]
fn test_build_report_with_generator() {
    let generator = QueueGenerator::new(vec![
        Ok("no style issues".to_string()),
        Ok("  proves bar  \n".to_string()),
        Ok("Overall overview".to_string()),
    ]);
    let sources = ReportSources {
        generator: Some(&generator),
        pull_request: PullRequest {
            title: "Prove things".to_string(),
            body: Some("Closes #1".to_string()),
        },
        style_guide: Some("Use tactics.".to_string()),
        ..Default::default()
    };
    let mut config = Config::default();
    config.max_diff_chars = 150;

    let body = build_report(&config, LEAN_DIFF, &sources, Utc::now()).unwrap();

    assert!(body.contains("Overall overview"));
    assert!(body.contains("> *Note: The diff was too large and was truncated.*"));
    assert!(body.contains("*   **Foo.lean**: proves bar\n"));
    assert!(body.contains("no style issues"));
    // Analysis still sees the whole diff.
    assert!(body.contains("❌ **Added:** 1 `sorry`(s)"));

    let prompts = generator.prompts.borrow();
    assert_eq!(prompts.len(), 3);
    assert!(prompts[0].contains("Use tactics."));
    assert!(prompts[2].contains("Prove things"));
    assert!(prompts[2].contains("- **Foo.lean**: proves bar"));
}

#[test]
fn test_build_report_synthesis_failure_is_fatal() {
    let generator = QueueGenerator::new(vec![
        Ok("file summary".to_string()),
        Err(ProofwatchError::GeneratorError("quota exceeded".to_string())),
    ]);
    let sources = ReportSources {
        generator: Some(&generator),
        ..Default::default()
    };

    let err = build_report(&Config::default(), LEAN_DIFF, &sources, Utc::now()).unwrap_err();

    assert_eq!(err.exit_code(), 5);
    assert!(err.to_string().contains("error synthesizing final summary"));
}

#[test]
fn test_open_issues_failure_yields_no_issues() {
    let forge = IssuesUnavailableForge::default();
    assert!(open_issues(&forge, "proof wanted").is_empty());
}

#[test]
fn test_post_report_survives_issue_listing_failure() {
    let forge = IssuesUnavailableForge::default();
    let generator = QueueGenerator::new(vec![
        Ok("proves bar".to_string()),
        Ok("Overview".to_string()),
    ]);
    let sources = ReportSources {
        generator: Some(&generator),
        issues: open_issues(&forge, "proof wanted"),
        ..Default::default()
    };

    let action = post_report(&Config::default(), &forge, LEAN_DIFF, sources, Utc::now()).unwrap();

    assert_eq!(action, CommentAction::Created);
    let created = forge.created.borrow();
    assert_eq!(created.len(), 1);
    assert!(created[0].contains("❌ **Added:** 1 `sorry`(s)"));
    assert!(!created[0].contains("(Issue #"));
    assert!(generator.prompts.borrow()[1].contains("Prove bar"));
}
