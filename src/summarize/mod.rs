//! Prose summaries of a pull request through a text generator.
//!
//! The diff is summarized per file (map step), then the per-file summaries
//! are synthesized into one overview (reduce step). An optional style-guide
//! check runs over the whole diff. Per-file and style failures degrade to an
//! `Error: ...` line in the report; a failed synthesis is an error.

mod generator;
mod template;


use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::{ProofwatchError, Result};

pub use generator::{CommandGenerator, TextGenerator};
pub use template::{TemplateError, render_template};

const SUMMARIZE_FILE_PROMPT: &str = include_str!("../../prompts/summarize_file.md");
const SYNTHESIZE_SUMMARY_PROMPT: &str = include_str!("../../prompts/synthesize_summary.md");
const CHECK_STYLE_PROMPT: &str = include_str!("../../prompts/check_style.md");

/// Prompt builder and dispatcher bound to one generator and model.
pub struct Summarizer<'a> {
    generator: &'a dyn TextGenerator,
    model: String,
}

impl<'a> Summarizer<'a> {
    pub fn new(generator: &'a dyn TextGenerator, model: impl Into<String>) -> Self {
        Self {
            generator,
            model: model.into(),
        }
    }

    /// Summarize every file section, rendered as `**<path>**: <summary>`.
    pub fn summarize_files(&self, files: &IndexMap<String, String>) -> Vec<String> {
        files
            .iter()
            .map(|(path, file_diff)| {
                let summary = self.summarize_file(path, file_diff);
                format!("**{}**: {}", path, summary.trim())
            })
            .collect()
    }

    /// Summarize a single file's diff.
    pub fn summarize_file(&self, file_path: &str, file_diff: &str) -> String {
        let variables = HashMap::from([("file_path", file_path), ("file_diff", file_diff)]);
        self.generate_or_degrade(SUMMARIZE_FILE_PROMPT, &variables)
    }

    /// Synthesize the overview from per-file summaries.
    pub fn synthesize(
        &self,
        per_file_summaries: &[String],
        pr_title: &str,
        pr_body: &str,
    ) -> Result<String> {
        let summaries = per_file_summaries
            .iter()
            .map(|s| format!("- {}", s))
            .collect::<Vec<_>>()
            .join("\n");
        let variables = HashMap::from([
            ("pr_title", pr_title),
            ("pr_body", pr_body),
            ("per_file_summaries", summaries.as_str()),
        ]);

        let prompt = render_prompt(SYNTHESIZE_SUMMARY_PROMPT, &variables)?;
        self.generator
            .generate(&prompt, &self.model)
            .map_err(|e| match e {
                ProofwatchError::GeneratorError(msg) => ProofwatchError::GeneratorError(format!(
                    "error synthesizing final summary: {}",
                    msg
                )),
                other => other,
            })
    }

    /// Check the diff against a style guide. `None` when the guide is empty.
    pub fn check_style(&self, diff: &str, style_guide: &str) -> Option<String> {
        if style_guide.trim().is_empty() {
            return None;
        }
        let variables = HashMap::from([("style_guide", style_guide), ("diff", diff)]);
        Some(self.generate_or_degrade(CHECK_STYLE_PROMPT, &variables))
    }

    fn generate_or_degrade(&self, template: &str, variables: &HashMap<&str, &str>) -> String {
        let result =
            render_prompt(template, variables).and_then(|p| self.generator.generate(&p, &self.model));

        match result {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "text generation failed");
                format!("Error: {}", e)
            }
        }
    }
}

fn render_prompt(template: &str, variables: &HashMap<&str, &str>) -> Result<String> {
    render_template(template, variables)
        .map_err(|e| ProofwatchError::UserError(format!("invalid prompt template: {}", e)))
}
