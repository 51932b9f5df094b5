//! Data types produced by the diff analyzer.

use indexmap::IndexMap;
use serde::Serialize;

/// Token conventions of the target language.
///
/// Defaults describe Lean 4: `sorry` placeholders, `--` line comments,
/// `:=` definitions, `.lean` files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSyntax {
    /// The incomplete-proof placeholder token.
    pub marker_token: String,
    /// Line-comment opener; a marker after it is commentary.
    pub comment_opener: String,
    /// Declaration headers are cut at the first occurrence of this operator.
    pub definition_operator: String,
    /// Extension (no leading dot) of files whose markers are tracked.
    pub target_extension: String,
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self {
            marker_token: "sorry".to_string(),
            comment_opener: "--".to_string(),
            definition_operator: ":=".to_string(),
            target_extension: "lean".to_string(),
        }
    }
}

/// One appearance of a marker inside a declaration, on one side of the diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerOccurrence {
    /// `<declaration name>@<file>`; does not depend on the line number.
    pub stable_id: String,
    pub file: String,
    pub declaration_name: String,
    /// Declaration line without its diff prefix, cut at the definition operator.
    pub declaration_header: String,
    /// 1-based line in the old (removed) or new (added) file version.
    pub line: usize,
}

impl MarkerOccurrence {
    /// Render as "`header` in `file`".
    pub fn descriptor(&self) -> String {
        format!("`{}` in `{}`", self.declaration_header, self.file)
    }
}

/// Marker occurrences collected during a scan, keyed by stable id.
///
/// Re-registering an id on the same side replaces the occurrence but keeps
/// its original position.
#[derive(Debug, Clone, Default)]
pub struct RawMarkers {
    pub added: IndexMap<String, MarkerOccurrence>,
    pub removed: IndexMap<String, MarkerOccurrence>,
}

/// Aggregate diff counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChangeStats {
    pub files_changed: usize,
    pub lines_added: usize,
    pub lines_removed: usize,
}

/// A marker whose declaration kept it but whose line number moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AffectedMarker {
    pub id: String,
    pub file: String,
    /// Declaration header taken from the added side.
    pub context: String,
    pub old_line: usize,
    pub new_line: usize,
}

/// The three disjoint marker categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifiedMarkers {
    /// "`header` in `file`" descriptors for markers only on the added side.
    pub added: Vec<String>,
    /// "`header` in `file`" descriptors for markers only on the removed side.
    pub removed: Vec<String>,
    pub affected: Vec<AffectedMarker>,
}

impl ClassifiedMarkers {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.affected.is_empty()
    }
}

/// Result of a scan before classification.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    pub stats: ChangeStats,
    pub raw: RawMarkers,
}

/// Final result of analyzing a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffAnalysis {
    pub stats: ChangeStats,
    pub markers: ClassifiedMarkers,
}
