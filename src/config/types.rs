//! Configuration defaults and environment variable names.

/// Comma-separated declaration keywords.
pub const ENV_KEYWORDS: &str = "INPUT_LEAN_KEYWORDS";
/// Model identifier passed to the text generator.
pub const ENV_MODEL: &str = "INPUT_GEMINI_MODEL";
/// Path to a style guide checked against the diff.
pub const ENV_STYLE_GUIDE_PATH: &str = "INPUT_STYLE_GUIDE_PATH";
/// Command template used to run the text generator.
pub const ENV_GENERATOR_COMMAND: &str = "PROOFWATCH_GENERATOR_COMMAND";

/// Split a comma-separated keyword list, trimming entries and dropping empty ones.
pub fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}

pub fn default_marker_keywords() -> Vec<String> {
    parse_keyword_list("def,abbrev,example,theorem,opaque,lemma,instance")
}

pub fn default_marker_token() -> String {
    "sorry".to_string()
}

pub fn default_comment_opener() -> String {
    "--".to_string()
}

pub fn default_definition_operator() -> String {
    ":=".to_string()
}

pub fn default_target_extension() -> String {
    "lean".to_string()
}

pub fn default_max_diff_chars() -> usize {
    1_500_000
}

pub fn default_model() -> String {
    "gemini-3-pro-preview".to_string()
}

pub fn default_issue_label() -> String {
    "proof wanted".to_string()
}

pub fn default_generator_timeout_seconds() -> u64 {
    180
}
