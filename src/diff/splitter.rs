//! Partitioning of a unified diff into per-file sections.

use indexmap::IndexMap;

use super::helpers::parse_diff_git_line;

/// Split a diff into `{new path: section text}`.
///
/// A section starts at a `diff --git` line and runs up to the next one.
/// Text before the first header is dropped. If a path appears twice, the
/// later section replaces the earlier one in its original position.
pub fn split_diff_into_files(diff: &str) -> IndexMap<String, String> {
    let mut files = IndexMap::new();
    let mut current: Option<(String, String)> = None;

    for line in diff.split_inclusive('\n') {
        let bare = line.trim_end_matches(['\n', '\r']);
        if let Some(header) = parse_diff_git_line(bare) {
            if let Some((path, text)) = current.take() {
                files.insert(path, text);
            }
            current = Some((header.new_path, line.to_string()));
            continue;
        }

        if let Some((_, text)) = current.as_mut() {
            text.push_str(line);
        }
    }

    if let Some((path, text)) = current {
        files.insert(path, text);
    }

    files
}
