//! Header parsing helpers shared by the analyzer and the splitter.

/// Paths captured from a `diff --git a/<old> b/<new>` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeader {
    pub old_path: String,
    pub new_path: String,
}

/// The four numbers of a `@@ -a,b +c,d @@` hunk header.
///
/// Counts default to 1 when omitted (`@@ -3 +3 @@`), as in git's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HunkHeader {
    pub old_start: usize,
    pub old_count: usize,
    pub new_start: usize,
    pub new_count: usize,
}

/// Parse a `diff --git` file header line.
///
/// The line must start with `diff --git a/`. Paths may contain spaces, so the
/// split between the two paths is the last ` b/` that leaves a non-empty path
/// on both sides.
pub fn parse_diff_git_line(line: &str) -> Option<FileHeader> {
    let rest = line.strip_prefix("diff --git a/")?;

    for (pos, _) in rest.rmatch_indices(" b/") {
        let old_path = &rest[..pos];
        let new_path = &rest[pos + 3..];
        if !old_path.is_empty() && !new_path.is_empty() {
            return Some(FileHeader {
                old_path: old_path.to_string(),
                new_path: new_path.to_string(),
            });
        }
    }

    None
}

/// Parse a hunk header line.
///
/// Format: "@@ -old_start,old_len +new_start,new_len @@" or "@@ -old_start +new_start @@"
/// Also handles: "@@ -old_start,old_len +new_start,new_len @@ context info"
pub fn parse_hunk_header(line: &str) -> Option<HunkHeader> {
    let line = line.strip_prefix("@@ -")?;

    let (old_part, rest) = line.split_once(' ')?;
    let rest = rest.strip_prefix('+')?;
    let (new_part, rest) = rest.split_once(' ')?;
    if !rest.starts_with("@@") {
        return None;
    }

    let (old_start, old_count) = parse_range(old_part)?;
    let (new_start, new_count) = parse_range(new_part)?;

    Some(HunkHeader {
        old_start,
        old_count,
        new_start,
        new_count,
    })
}

/// Parse "start" or "start,len" (an empty len is tolerated).
fn parse_range(range: &str) -> Option<(usize, usize)> {
    let (start, count) = match range.split_once(',') {
        Some((start, "")) => (start, None),
        Some((start, count)) => (start, Some(count)),
        None => (range, None),
    };

    let start = parse_digits(start)?;
    let count = match count {
        Some(count) => parse_digits(count)?,
        None => 1,
    };

    Some((start, count))
}

fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
