//! Overlong lines.

use super::{Violation, ViolationRule};

/// One violation per line longer than `max` characters.
///
/// Length is counted in characters, not bytes, and excludes the line ending.
pub fn detect_long_lines(file: &str, text: &str, max: usize) -> Vec<Violation> {
    text.lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let len = line.chars().count();
            (len > max).then(|| {
                Violation::new(
                    ViolationRule::LineLength,
                    file,
                    idx + 1,
                    format!("{} characters (limit {})", len, max),
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Severity;

    #[test]
    fn test_long_lines() {
        let text = format!("short\n{}\n{}\r\n", "x".repeat(11), "y".repeat(10));
        let violations = detect_long_lines("a.c", &text, 10);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 2);
        assert_eq!(violations[0].message, "11 characters (limit 10)");
        assert_eq!(violations[0].severity, Severity::Warning);
    }

    #[test]
    fn test_counts_characters() {
        let text = "é".repeat(10);
        assert!(detect_long_lines("a.c", &text, 10).is_empty());
    }
}
