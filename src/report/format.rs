//! Comment layout.

use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::diff::{AffectedMarker, ChangeStats, ClassifiedMarkers, DiffAnalysis};
use crate::forge::{Issue, comment_identifier};

/// Everything the summary comment is built from.
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub ai_summary: &'a str,
    pub analysis: &'a DiffAnalysis,
    /// The diff was cut before summarization.
    pub truncated: bool,
    /// Open tracking issues; affected markers link to the first match.
    pub issues: &'a [Issue],
    pub per_file_summaries: &'a [String],
    pub style_report: Option<&'a str>,
    /// Marker token as shown in headings (`sorry`).
    pub marker_token: &'a str,
}

/// Hidden marker a tracking issue carries in its body.
pub fn tracker_id_marker(stable_id: &str) -> String {
    format!("<!-- sorry-tracker-id: {} -->", stable_id)
}

/// " (Issue #N)" for the first issue tracking `stable_id`, or "".
pub fn issue_link(stable_id: &str, issues: &[Issue]) -> String {
    let marker = tracker_id_marker(stable_id);
    issues
        .iter()
        .find(|issue| issue.body.as_deref().is_some_and(|b| b.contains(&marker)))
        .map(|issue| format!(" (Issue #{})", issue.number))
        .unwrap_or_default()
}

/// Render the full comment body.
pub fn format_summary(input: &ReportInput<'_>, now: DateTime<Utc>) -> String {
    let mut out = format!(
        "### 🤖 Gemini PR Summary\n\n{}\n\n{}\n",
        comment_identifier(now),
        input.ai_summary
    );
    if input.truncated {
        out.push_str("> *Note: The diff was too large and was truncated.*\n");
    }

    out.push_str("\n---\n\n");
    out.push_str(&format_metrics_table(&input.analysis.stats));

    out.push_str("\n---\n\n");
    out.push_str(&format_marker_section(
        &input.analysis.markers,
        input.issues,
        input.marker_token,
    ));

    if let Some(style_report) = input.style_report {
        let _ = write!(
            out,
            "\n---\n\n<details><summary>🎨 **Style Guide Adherence**</summary>\n\n{}\n</details>\n",
            style_report
        );
    }

    if !input.per_file_summaries.is_empty() {
        out.push_str("\n---\n\n<details><summary>📄 **Per-File Summaries**</summary>\n\n");
        push_bullets(&mut out, input.per_file_summaries);
        out.push_str("</details>\n");
    }

    let _ = write!(
        out,
        "\n---\n\n*Last updated: {}.*",
        now.format("%Y-%m-%d %H:%M UTC")
    );
    out
}

/// The "Analysis of Changes" table.
pub fn format_metrics_table(stats: &ChangeStats) -> String {
    format!(
        "**Analysis of Changes**\n\n\
         | Metric | Count |\n\
         | --- | --- |\n\
         | 📝 **Files Changed** | {} |\n\
         | ✅ **Lines Added** | {} |\n\
         | ❌ **Lines Removed** | {} |\n",
        stats.files_changed, stats.lines_added, stats.lines_removed
    )
}

/// The marker tracking section with collapsible removed/added/affected lists.
pub fn format_marker_section(
    markers: &ClassifiedMarkers,
    issues: &[Issue],
    marker_token: &str,
) -> String {
    let mut out = format!("**`{}` Tracking**\n\n", marker_token);

    if !markers.removed.is_empty() {
        let _ = write!(
            out,
            "<details><summary>✅ **Removed:** {} `{}`(s)</summary>\n\n",
            markers.removed.len(),
            marker_token
        );
        push_bullets(&mut out, &markers.removed);
        out.push_str("</details>\n");
    }

    if !markers.added.is_empty() {
        let _ = write!(
            out,
            "<details><summary>❌ **Added:** {} `{}`(s)</summary>\n\n",
            markers.added.len(),
            marker_token
        );
        push_bullets(&mut out, &markers.added);
        out.push_str("</details>\n");
    }

    if !markers.affected.is_empty() {
        let _ = write!(
            out,
            "<details><summary>✏️ **Affected:** {} `{}`(s) (line number changed)</summary>\n\n",
            markers.affected.len(),
            marker_token
        );
        for marker in &markers.affected {
            out.push_str(&format_affected(marker, issues));
        }
        out.push_str("</details>\n");
    }

    if markers.is_empty() {
        let _ = writeln!(
            out,
            "*   No `{}`s were added, removed, or affected.",
            marker_token
        );
    }

    out
}

/// Plain-text rendering for terminals.
pub fn format_text(analysis: &DiffAnalysis) -> String {
    let stats = &analysis.stats;
    let markers = &analysis.markers;

    let mut out = format!(
        "Files changed: {}\nLines added:   {}\nLines removed: {}\n",
        stats.files_changed, stats.lines_added, stats.lines_removed
    );

    for (label, items) in [("Removed", &markers.removed), ("Added", &markers.added)] {
        if !items.is_empty() {
            let _ = writeln!(out, "\n{} ({}):", label, items.len());
            for item in items {
                let _ = writeln!(out, "  {}", item.replace('`', ""));
            }
        }
    }

    if !markers.affected.is_empty() {
        let _ = writeln!(out, "\nAffected ({}):", markers.affected.len());
        for m in &markers.affected {
            let _ = writeln!(
                out,
                "  {} in {}: L{} -> L{}",
                m.context, m.file, m.old_line, m.new_line
            );
        }
    }

    out
}

fn format_affected(marker: &AffectedMarker, issues: &[Issue]) -> String {
    format!(
        "*   `{}` in `{}` moved from L{} to L{}{}\n",
        marker.context,
        marker.file,
        marker.old_line,
        marker.new_line,
        issue_link(&marker.id, issues)
    )
}

fn push_bullets(out: &mut String, items: &[String]) {
    for item in items {
        let _ = writeln!(out, "*   {}", item);
    }
}
