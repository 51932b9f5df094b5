//! Reconciliation of added and removed marker occurrences by stable id.

use super::types::{AffectedMarker, ClassifiedMarkers, RawMarkers};

/// Classify raw occurrences into added-only, removed-only and affected.
///
/// An id present on both sides is a marker that stayed in its declaration
/// while the line moved. Output follows the insertion order of `raw.added`
/// (affected, added) and `raw.removed` (removed).
pub fn classify(raw: &RawMarkers) -> ClassifiedMarkers {
    let mut classified = ClassifiedMarkers::default();

    for (id, added) in &raw.added {
        match raw.removed.get(id) {
            Some(removed) => classified.affected.push(AffectedMarker {
                id: id.clone(),
                file: added.file.clone(),
                context: added.declaration_header.clone(),
                old_line: removed.line,
                new_line: added.line,
            }),
            None => classified.added.push(added.descriptor()),
        }
    }

    for (id, removed) in &raw.removed {
        if !raw.added.contains_key(id) {
            classified.removed.push(removed.descriptor());
        }
    }

    classified
}
