//! Header-comment extraction: the documentation block right above a definition.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `template <...>` lines sit between a comment and its definition.
    static ref TEMPLATE_INTRODUCER: Regex = Regex::new(r"^template\s*<").unwrap();

    /// Preprocessor directives are code, not `#` comments.
    static ref PREPROCESSOR_DIRECTIVE: Regex = Regex::new(
        r"^#\s*(include|define|undef|if|ifdef|ifndef|elif|else|endif|pragma|error|warning|line|import)\b"
    ).unwrap();
}

/// Line prefixes that mark a comment line.
const COMMENT_MARKERS: &[&str] = &["//", "*", "#"];

/// Return the comment block that immediately precedes `definition_offset`.
///
/// A trailing `/* ... */` block wins. Otherwise consecutive comment lines
/// (`//`, `*`, `#`) above the definition are collected, skipping blank lines
/// and `template <...>` introducers, until the first line of code.
/// Preprocessor directives such as `#include` count as code and end the block.
pub fn extract_header_comment(text: &str, definition_offset: usize) -> Option<String> {
    let preceding = text[..definition_offset.min(text.len())].trim_end();

    if let Some(block) = trailing_block_comment(preceding) {
        return Some(block.to_string());
    }

    let mut lines = Vec::new();
    for line in preceding.lines().rev() {
        let trimmed = line.trim();
        if trimmed.is_empty() || TEMPLATE_INTRODUCER.is_match(trimmed) {
            continue;
        }
        if is_comment_line(trimmed) {
            lines.push(trimmed);
        } else {
            break;
        }
    }

    if lines.is_empty() {
        return None;
    }
    lines.reverse();
    Some(lines.join("\n"))
}

/// The `/* ... */` block `preceding` ends with, if any.
fn trailing_block_comment(preceding: &str) -> Option<&str> {
    let close = preceding.len().checked_sub(2)?;
    if !preceding.ends_with("*/") {
        return None;
    }
    // Inside a comment `/*` is plain text, so the opener is the first `/*`
    // after the previous comment's end.
    let search_from = preceding[..close].rfind("*/").map_or(0, |i| i + 2);
    let open = preceding[search_from..close].find("/*")? + search_from;
    Some(&preceding[open..])
}

fn is_comment_line(trimmed: &str) -> bool {
    COMMENT_MARKERS.iter().any(|m| trimmed.starts_with(m))
        && !PREPROCESSOR_DIRECTIVE.is_match(trimmed)
}
