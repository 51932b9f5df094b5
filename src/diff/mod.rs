//! Diff analysis for proof-obligation markers.
//!
//! This module parses unified diff text (as produced by `git diff`) to:
//! - count touched files and added/removed lines
//! - track `sorry` markers inside declarations on changed lines
//! - classify markers as added, removed, or merely moved (affected)
//!
//! Marker identity is `<declaration name>@<file>`, so a declaration that
//! shifts within a file is recognised on both sides of the diff regardless of
//! its line numbers. A renamed file counts as a removal plus an addition.

mod analyzer;
mod classify;
mod helpers;
mod splitter;
mod types;


pub use analyzer::{DiffAnalyzer, extract_declaration_name};
pub use classify::classify;
pub use helpers::{FileHeader, HunkHeader, parse_diff_git_line, parse_hunk_header};
pub use splitter::split_diff_into_files;
pub use types::{
    AffectedMarker, ChangeStats, ClassifiedMarkers, DiffAnalysis, MarkerOccurrence, MarkerSyntax,
    RawMarkers, ScanOutcome,
};
