//! Pending-work markers (TODO, FIXME, HACK).

use regex::{Regex, RegexBuilder};

use super::{Violation, ViolationRule};

/// Whole-word, case-insensitive matcher for the configured keywords.
pub fn marker_pattern<S: AsRef<str>>(keywords: &[S]) -> anyhow::Result<Regex> {
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|k| regex::escape(k.as_ref().trim()))
        .collect();
    RegexBuilder::new(&format!(r"\b({})\b", alternatives.join("|")))
        .case_insensitive(true)
        .build()
        .map_err(|e| anyhow::anyhow!("invalid pending_markers keywords: {}", e))
}

/// One violation per line containing a marker.
pub fn detect_pending_markers(file: &str, text: &str, pattern: &Regex) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (line_num, line) in text.lines().enumerate() {
        let Some(m) = pattern.find(line) else {
            continue;
        };
        let context = line[m.end()..]
            .trim_start_matches(|c: char| c == ':' || c.is_whitespace())
            .trim_end_matches("*/")
            .trim();
        let marker = m.as_str().to_uppercase();
        let message = if context.is_empty() {
            format!("{} marker", marker)
        } else {
            format!("{}: {}", marker, context)
        };
        violations.push(Violation::new(
            ViolationRule::PendingMarker,
            file,
            line_num + 1,
            message,
        ));
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Severity;

    fn pattern() -> Regex {
        marker_pattern(&["TODO", "FIXME", "HACK"]).unwrap()
    }

    #[test]
    fn test_detect_markers() {
        let text = r#"
int main() {
    // TODO: handle negative sizes
    int todos = 0;
    /* fixme */
    return 0; // hack around compiler bug
}
"#;
        let violations = detect_pending_markers("main.c", text, &pattern());
        let lines: Vec<_> = violations.iter().map(|v| v.line).collect();
        assert_eq!(lines, vec![3, 5, 6]);
        assert_eq!(violations[0].message, "TODO: handle negative sizes");
        assert_eq!(violations[1].message, "FIXME marker");
        assert_eq!(violations[2].message, "HACK: around compiler bug");
        assert!(violations.iter().all(|v| v.severity == Severity::Info));
    }

    #[test]
    fn test_whole_words_only() {
        let text = "int todolist = 0;\nauto hacked = true;\n";
        assert!(detect_pending_markers("a.c", text, &pattern()).is_empty());
    }

    #[test]
    fn test_custom_keywords_are_escaped() {
        let pattern = marker_pattern(&["XXX", "C++"]).unwrap();
        assert!(pattern.is_match("// xxx later"));
        assert!(!pattern.is_match("// C+ code"));
    }
}
