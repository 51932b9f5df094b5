//! Single-pass unified diff scanner that tracks marker occurrences.
//!
//! The scan keeps an explicit [`ScanCursor`] per call: the current file, the
//! old/new line counters and the declaration currently in effect. Declaration
//! recognition is a textual heuristic over the configured keywords, not a
//! parse of the target language.

use indexmap::IndexSet;
use regex::Regex;

use crate::config::Config;
use crate::error::{ProofwatchError, Result};

use super::classify::classify;
use super::helpers::{parse_diff_git_line, parse_hunk_header};
use super::types::{ChangeStats, DiffAnalysis, MarkerOccurrence, MarkerSyntax, RawMarkers, ScanOutcome};

/// Compiled analyzer configuration. Immutable and reusable across diffs.
#[derive(Debug, Clone)]
pub struct DiffAnalyzer {
    keywords: Vec<String>,
    syntax: MarkerSyntax,
    extension_suffix: String,
    name_pattern: Regex,
}

/// Mutable state of one scan.
#[derive(Debug, Default)]
struct ScanCursor {
    file: String,
    old_line: usize,
    new_line: usize,
    declaration_header: String,
    declaration_name: String,
}

impl ScanCursor {
    fn enter_file(&mut self, path: String) {
        self.file = path;
        self.clear_declaration();
    }

    fn enter_hunk(&mut self, old_start: usize, new_start: usize) {
        self.old_line = old_start;
        self.new_line = new_start;
        self.clear_declaration();
    }

    fn clear_declaration(&mut self) {
        self.declaration_header.clear();
        self.declaration_name.clear();
    }

    /// Counters saturate: a hunk header may claim any start line.
    fn advance(&mut self, line: &str) {
        if line.starts_with('+') {
            self.new_line = self.new_line.saturating_add(1);
        } else if line.starts_with('-') {
            self.old_line = self.old_line.saturating_add(1);
        } else {
            self.old_line = self.old_line.saturating_add(1);
            self.new_line = self.new_line.saturating_add(1);
        }
    }
}

impl DiffAnalyzer {
    /// Build an analyzer for the given declaration keywords.
    ///
    /// Keyword order matters for name extraction: at any position the first
    /// keyword in the list that matches wins.
    pub fn new(keywords: Vec<String>, syntax: MarkerSyntax) -> Result<Self> {
        let name_pattern = build_name_pattern(&keywords)?;
        let extension_suffix = format!(".{}", syntax.target_extension);

        Ok(Self {
            keywords,
            syntax,
            extension_suffix,
            name_pattern,
        })
    }

    /// Build an analyzer from the loaded configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.marker_keywords.clone(), config.marker_syntax())
    }

    /// Analyze a diff: scan it and classify the markers.
    pub fn analyze(&self, diff: &str) -> DiffAnalysis {
        let outcome = self.scan(diff);
        let markers = classify(&outcome.raw);

        tracing::info!(
            files_changed = outcome.stats.files_changed,
            lines_added = outcome.stats.lines_added,
            lines_removed = outcome.stats.lines_removed,
            added = markers.added.len(),
            removed = markers.removed.len(),
            affected = markers.affected.len(),
            "analyzed diff"
        );

        DiffAnalysis {
            stats: outcome.stats,
            markers,
        }
    }

    /// Scan a diff without classifying, returning stats and raw occurrences.
    pub fn scan(&self, diff: &str) -> ScanOutcome {
        let mut cursor = ScanCursor::default();
        let mut touched: IndexSet<String> = IndexSet::new();
        let mut stats = ChangeStats::default();
        let mut raw = RawMarkers::default();

        for line in diff.lines() {
            if let Some(header) = parse_diff_git_line(line) {
                tracing::debug!(file = %header.new_path, "entering file");
                touched.insert(header.new_path.clone());
                cursor.enter_file(header.new_path);
                continue;
            }

            if let Some(hunk) = parse_hunk_header(line) {
                cursor.enter_hunk(hunk.old_start, hunk.new_start);
                continue;
            }

            if line.starts_with("---") || line.starts_with("+++") {
                continue;
            }

            if !cursor.file.ends_with(&self.extension_suffix) {
                continue;
            }

            if line.starts_with('+') {
                stats.lines_added += 1;
            } else if line.starts_with('-') {
                stats.lines_removed += 1;
            }

            self.track_marker(line, &mut cursor, &mut raw);
            cursor.advance(line);
        }

        stats.files_changed = touched.len();
        ScanOutcome { stats, raw }
    }

    /// Update declaration context from `line` and record a marker if present.
    ///
    /// Runs before the cursor advances past `line`.
    fn track_marker(&self, line: &str, cursor: &mut ScanCursor, raw: &mut RawMarkers) {
        if opens_declaration(strip_diff_prefix(line), &self.keywords) {
            cursor.declaration_header = declaration_header(line).to_string();
            cursor.declaration_name = capture_name(&self.name_pattern, &cursor.declaration_header)
                .unwrap_or_default()
                .to_string();
        }

        let token = self.syntax.marker_token.as_str();
        if cursor.declaration_name.is_empty() || !line.contains(token) {
            return;
        }

        if let (Some(comment_pos), Some(marker_pos)) =
            (line.find(&self.syntax.comment_opener), line.rfind(token))
            && comment_pos < marker_pos
        {
            return;
        }

        let (line_number, added) = if line.starts_with('+') {
            (cursor.new_line, true)
        } else if line.starts_with('-') {
            (cursor.old_line, false)
        } else {
            return;
        };

        let stable_id = format!("{}@{}", cursor.declaration_name, cursor.file);
        let header = cursor
            .declaration_header
            .split(self.syntax.definition_operator.as_str())
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();

        let occurrence = MarkerOccurrence {
            stable_id: stable_id.clone(),
            file: cursor.file.clone(),
            declaration_name: cursor.declaration_name.clone(),
            declaration_header: header,
            line: line_number,
        };

        tracing::trace!(id = %stable_id, line = line_number, added, "marker occurrence");
        if added {
            raw.added.insert(stable_id, occurrence);
        } else {
            raw.removed.insert(stable_id, occurrence);
        }
    }
}

/// Extract the declaration name from a single line.
///
/// Matches the shortest prefix followed by one of `keywords`, whitespace, and
/// a name token ending at whitespace, `(`, `{` or `:`. Returns `None` when
/// `keywords` is empty or nothing matches.
pub fn extract_declaration_name(line: &str, keywords: &[String]) -> Option<String> {
    let pattern = build_name_pattern(keywords).ok()?;
    capture_name(&pattern, line).map(str::to_string)
}

fn build_name_pattern(keywords: &[String]) -> Result<Regex> {
    if keywords.is_empty() || keywords.iter().any(|k| k.is_empty()) {
        return Err(ProofwatchError::UserError(
            "marker keywords must be a non-empty list of non-empty words".to_string(),
        ));
    }

    let alternation = keywords
        .iter()
        .map(|k| regex::escape(k))
        .collect::<Vec<_>>()
        .join("|");
    let pattern = format!(r"^.*?(?:{})\s+([^\s(\{{:]+)", alternation);

    Regex::new(&pattern).map_err(|e| {
        ProofwatchError::UserError(format!("failed to compile declaration pattern: {}", e))
    })
}

fn capture_name<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Drop the diff prefix character (`+`, `-` or space) and the spaces after it.
///
/// Tabs are not skipped, so a tab-indented keyword does not open a declaration.
fn strip_diff_prefix(line: &str) -> &str {
    line.strip_prefix(['+', '-', ' '])
        .unwrap_or(line)
        .trim_start_matches(' ')
}

/// True if `content` starts with a keyword followed by a space.
fn opens_declaration(content: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| {
        content
            .strip_prefix(keyword.as_str())
            .is_some_and(|rest| rest.starts_with(' '))
    })
}

/// Declaration header text: `+`/`-` lines lose the prefix and leading
/// whitespace, context lines are kept as they are.
fn declaration_header(line: &str) -> &str {
    match line.strip_prefix(['+', '-']) {
        Some(rest) => rest.trim_start(),
        None => line,
    }
}
