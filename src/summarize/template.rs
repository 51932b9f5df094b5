//! `{name}` placeholders for prompts and the generator command.
//!
//! `{{` and `}}` are literal braces. Values are inserted as they are and never
//! rescanned, so a diff full of braces needs no escaping.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unknown placeholder '{{{0}}}'")]
    UnknownPlaceholder(String),

    #[error("unclosed '{{' at byte {0}")]
    Unclosed(usize),
}

pub fn render_template(
    template: &str,
    variables: &HashMap<&str, &str>,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
        } else if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
        } else {
            let close = tail
                .find('}')
                .ok_or(TemplateError::Unclosed(template.len() - tail.len()))?;
            let name = tail[1..close].trim();
            let value = variables
                .get(name)
                .ok_or_else(|| TemplateError::UnknownPlaceholder(name.to_string()))?;
            out.push_str(value);
            rest = &tail[close + 1..];
        }
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &[(&'a str, &'a str)]) -> HashMap<&'a str, &'a str> {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let vars = vars(&[("file_path", "Foo.lean"), ("model", "m")]);
        let result = render_template("Summarize {file_path} with {model}.", &vars).unwrap();
        assert_eq!(result, "Summarize Foo.lean with m.");
    }

    #[test]
    fn test_doubled_braces_are_literal() {
        let result = render_template("Use {{var}} for variables", &HashMap::new()).unwrap();
        assert_eq!(result, "Use {var} for variables");
    }

    #[test]
    fn test_braces_in_value_are_not_rescanned() {
        let vars = vars(&[("diff", "+def f {α} : α → α := id")]);
        let result = render_template("```\n{diff}\n```", &vars).unwrap();
        assert_eq!(result, "```\n+def f {α} : α → α := id\n```");
    }

    #[test]
    fn test_placeholder_name_is_trimmed() {
        let vars = vars(&[("name", "x")]);
        assert_eq!(render_template("{ name }", &vars).unwrap(), "x");
    }

    #[test]
    fn test_lone_closing_brace_is_literal() {
        assert_eq!(render_template("a } b", &HashMap::new()).unwrap(), "a } b");
    }

    #[test]
    fn test_unknown_placeholder() {
        let err = render_template("Hello {name}", &HashMap::new()).unwrap_err();
        assert_eq!(err, TemplateError::UnknownPlaceholder("name".to_string()));
        assert_eq!(err.to_string(), "unknown placeholder '{name}'");

        let err = render_template("Hello {}", &HashMap::new()).unwrap_err();
        assert_eq!(err, TemplateError::UnknownPlaceholder(String::new()));
    }

    #[test]
    fn test_unclosed_placeholder() {
        let err = render_template("Hello {name", &HashMap::new()).unwrap_err();
        assert_eq!(err, TemplateError::Unclosed(6));
        assert_eq!(err.to_string(), "unclosed '{' at byte 6");
    }
}
