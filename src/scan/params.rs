//! Parameter-list splitting and parameter-name resolution.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::lexer::blank_trivia;

lazy_static! {
    /// A complete identifier.
    static ref IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();

    /// The identifier run directly before a pointer/reference/array decoration.
    static ref DECORATED_NAME: Regex = Regex::new(r"([A-Za-z_][A-Za-z0-9_]*)[\[*&]").unwrap();

    /// Function-pointer and array-reference declarators: `(*name)`, `(&name)`.
    static ref PAREN_DECLARATOR: Regex =
        Regex::new(r"\(\s*[*&]+\s*([A-Za-z_][A-Za-z0-9_]*)\s*\)").unwrap();

    static ref NON_WORD: Regex = Regex::new(r"[^A-Za-z0-9_]").unwrap();
}

/// Names that never count as real parameters.
const PLACEHOLDER_NAMES: &[&str] = &["self", "cls", "_", "__"];

/// One comma-separated segment of a parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamSpec<'a> {
    /// The segment as written, trimmed.
    pub raw_text: &'a str,
    /// The bare parameter name, if the segment declares a usable one.
    pub clean_name: Option<String>,
}

/// Split a raw parameter list into [`ParamSpec`]s.
///
/// Only top-level commas separate parameters: commas nested in `()`, `[]`,
/// `{}` or template `<>` stay inside their segment. Angle brackets are not
/// tracked once a segment reaches its default value, where `<` is usually a
/// comparison. Comments inside a segment are ignored when resolving names.
pub fn split_parameters(parameter_text: &str) -> Vec<ParamSpec<'_>> {
    let blanked = blank_trivia(parameter_text);
    let bytes = blanked.as_bytes();

    let mut specs = Vec::new();
    let mut depth = 0usize;
    let mut angle = 0usize;
    let mut in_default = false;
    let mut seg_start = 0;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' | b'[' | b'{' => depth += 1,
            b')' | b']' | b'}' => depth = depth.saturating_sub(1),
            b'<' if !in_default => angle += 1,
            b'>' if !in_default => angle = angle.saturating_sub(1),
            b'=' if depth == 0 && angle == 0 => in_default = true,
            b',' if depth == 0 && angle == 0 => {
                push_segment(&mut specs, parameter_text, &blanked, seg_start, i);
                seg_start = i + 1;
                in_default = false;
            }
            _ => {}
        }
    }
    push_segment(&mut specs, parameter_text, &blanked, seg_start, bytes.len());

    specs
}

fn push_segment<'a>(
    specs: &mut Vec<ParamSpec<'a>>,
    original: &'a str,
    blanked: &str,
    start: usize,
    end: usize,
) {
    let raw_text = original[start..end].trim();
    if raw_text.is_empty() {
        return;
    }
    let clean_name = resolve_parameter_name(&blanked[start..end])
        .filter(|name| !PLACEHOLDER_NAMES.contains(&name.as_str()));
    specs.push(ParamSpec {
        raw_text,
        clean_name,
    });
}

/// Reduce one raw parameter declaration to its bare identifier.
///
/// Returns `None` for `void`, empty segments, aggregate/array initializers
/// and anything that does not end in an identifier.
pub fn resolve_parameter_name(raw_segment: &str) -> Option<String> {
    let segment = raw_segment.trim();
    if segment.is_empty() || segment.eq_ignore_ascii_case("void") {
        return None;
    }

    let declarator = match top_level_equals(segment) {
        Some(eq) => segment[..eq].trim(),
        None => segment,
    };
    if declarator.starts_with('{') || declarator.starts_with('[') {
        return None;
    }

    if let Some(caps) = PAREN_DECLARATOR.captures(declarator) {
        return Some(caps[1].to_string());
    }

    let token = declarator.split_whitespace().last()?;
    let name = match DECORATED_NAME.captures(token) {
        Some(caps) => caps[1].to_string(),
        None => NON_WORD.replace_all(token, "").into_owned(),
    };

    IDENTIFIER.is_match(&name).then_some(name)
}

/// Offset of the first `=` outside any bracket pair.
fn top_level_equals(segment: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, b) in segment.bytes().enumerate() {
        match b {
            b'(' | b'[' | b'{' | b'<' => depth += 1,
            b')' | b']' | b'}' | b'>' => depth = depth.saturating_sub(1),
            b'=' if depth == 0 => return Some(i),
            _ => {}
        }
    }
    None
}

/// Clean parameter names of a parameter list, in declaration order.
pub fn parameter_names(parameter_text: &str) -> Vec<String> {
    split_parameters(parameter_text)
        .into_iter()
        .filter_map(|p| p.clean_name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(raw: &str) -> Option<String> {
        resolve_parameter_name(raw)
    }

    #[test]
    fn test_resolve_basic_shapes() {
        assert_eq!(name("const std::vector<int>& values").as_deref(), Some("values"));
        assert_eq!(name("int arr[10]").as_deref(), Some("arr"));
        assert_eq!(name("void"), None);
        assert_eq!(name("int* p = nullptr").as_deref(), Some("p"));
        assert_eq!(name("int *p").as_deref(), Some("p"));
        assert_eq!(name("char **argv").as_deref(), Some("argv"));
        assert_eq!(name("std::string&& s").as_deref(), Some("s"));
        assert_eq!(name("unsigned long count").as_deref(), Some("count"));
    }

    #[test]
    fn test_resolve_not_named() {
        assert_eq!(name(""), None);
        assert_eq!(name("   "), None);
        assert_eq!(name("VOID"), None);
        assert_eq!(name("{1, 2}"), None);
        assert_eq!(name("[]"), None);
        assert_eq!(name("..."), None);
        assert_eq!(name("int 3d"), None);
    }

    #[test]
    fn test_resolve_function_pointer() {
        assert_eq!(name("int (*callback)(int, int)").as_deref(), Some("callback"));
        assert_eq!(name("int (&row)[4]").as_deref(), Some("row"));
    }

    #[test]
    fn test_split_respects_nesting() {
        let specs = split_parameters("std::map<int, std::string> m, std::function<void(int, int)> cb, int n = f(1, 2)");
        let names: Vec<_> = specs.iter().map(|s| s.clean_name.as_deref()).collect();
        assert_eq!(names, vec![Some("m"), Some("cb"), Some("n")]);
        assert_eq!(specs[2].raw_text, "int n = f(1, 2)");
    }

    #[test]
    fn test_split_default_with_comparison() {
        let names = parameter_names("bool flag = a < b, int other");
        assert_eq!(names, vec!["flag", "other"]);
    }

    #[test]
    fn test_split_ignores_comments() {
        let specs = split_parameters("int a /* the, input */, int b // trailing\n");
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].clean_name.as_deref(), Some("a"));
        assert_eq!(specs[0].raw_text, "int a /* the, input */");
        assert_eq!(specs[1].clean_name.as_deref(), Some("b"));
    }

    #[test]
    fn test_placeholders_are_not_named() {
        let specs = split_parameters("self, _, x");
        assert_eq!(specs.len(), 3);
        assert_eq!(specs[0].clean_name, None);
        assert_eq!(specs[1].clean_name, None);
        assert_eq!(specs[2].clean_name.as_deref(), Some("x"));
    }

    #[test]
    fn test_void_and_empty_lists() {
        assert!(parameter_names("void").is_empty());
        assert!(parameter_names("").is_empty());
        assert!(parameter_names("  \n ").is_empty());
    }
}
