//! Markdown rendering of the pull-request summary comment.

mod format;


pub use format::{
    ReportInput, format_marker_section, format_metrics_table, format_summary, format_text,
    issue_link, tracker_id_marker,
};
