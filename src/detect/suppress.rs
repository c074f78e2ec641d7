//! Inline suppression of violations via comments.
//!
//! Supports suppression comments like:
//! - `// paramlint:ignore <rule> - <reason>`
//! - `// paramlint:ignore-next-line <rule> - <reason>`
//! - `// paramlint:ignore-file <rule> - <reason>`
//!
//! `#` and `/* */` comments work the same way, and `*` matches every rule.
//! Parameter rules are reported on the line where the signature starts, so a
//! suppression above a function header covers that function.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::{Violation, ViolationRule};

/// How a suppression applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuppressionType {
    /// Applies to the same line
    Line,
    /// Applies to the next line
    NextLine,
    /// Applies to the entire file
    File,
}

/// An inline suppression directive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suppression {
    /// Rule to suppress (e.g., "unused_parameter") or "*" for all
    pub rule: String,
    /// Human-readable reason
    pub reason: String,
    /// File containing the suppression
    pub file: String,
    /// Line number (0 for file-level)
    pub line: usize,
    pub suppression_type: SuppressionType,
}

/// A violation that was suppressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuppressedViolation {
    pub violation: Violation,
    pub suppression: Suppression,
}

lazy_static::lazy_static! {
    static ref SUPPRESSION_PATTERNS: Vec<Regex> = vec![
        // C-family line comments: // paramlint:...
        Regex::new(r"//\s*paramlint:(ignore(?:-file|-next-line)?)\s+(\S+)\s*(?:-\s*(.*))?").unwrap(),
        // Script style: # paramlint:...
        Regex::new(r"#\s*paramlint:(ignore(?:-file|-next-line)?)\s+(\S+)\s*(?:-\s*(.*))?").unwrap(),
        // Block comment style: /* paramlint:... */
        Regex::new(r"/\*\s*paramlint:(ignore(?:-file|-next-line)?)\s+(\S+?)\s*(?:-\s*(.*?))?\s*\*/").unwrap(),
    ];
}

/// Comment openers that keep a file in its leading comment block.
const COMMENT_PREFIXES: &[&str] = &["//", "#", "/*", "*"];

/// File-level suppressions are honoured anywhere in the first lines.
const FILE_HEADER_LINES: usize = 10;

/// Parse suppression directives from file content.
pub fn parse_suppressions(file_path: &str, content: &str) -> Vec<Suppression> {
    let mut suppressions = Vec::new();
    let mut in_header_block = true;

    for (line_num, line) in content.lines().enumerate() {
        let line_number = line_num + 1;
        let trimmed = line.trim();

        if in_header_block && !is_comment_or_empty(trimmed) {
            in_header_block = false;
        }

        for pattern in SUPPRESSION_PATTERNS.iter() {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };
            let directive = caps.get(1).map_or("", |m| m.as_str());
            let rule = caps.get(2).map_or("", |m| m.as_str());
            let reason = caps
                .get(3)
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default();

            let suppression_type = match directive {
                "ignore-file" => {
                    if !in_header_block && line_number > FILE_HEADER_LINES {
                        continue;
                    }
                    SuppressionType::File
                }
                "ignore-next-line" => SuppressionType::NextLine,
                "ignore" => {
                    // Alone on its line it covers the next line; after code it
                    // covers its own line.
                    let before = &line[..caps.get(0).map_or(0, |m| m.start())];
                    if before.trim().is_empty() {
                        SuppressionType::NextLine
                    } else {
                        SuppressionType::Line
                    }
                }
                _ => continue,
            };

            suppressions.push(Suppression {
                rule: rule.to_string(),
                reason,
                file: file_path.to_string(),
                line: if suppression_type == SuppressionType::File {
                    0
                } else {
                    line_number
                },
                suppression_type,
            });
            break;
        }
    }

    suppressions
}

fn is_comment_or_empty(line: &str) -> bool {
    line.is_empty() || COMMENT_PREFIXES.iter().any(|p| line.starts_with(p))
}

/// Check if a violation matches a suppression.
pub fn matches_suppression(violation: &Violation, suppression: &Suppression) -> bool {
    if violation.file != suppression.file {
        return false;
    }

    if suppression.rule != "*" {
        match ViolationRule::parse(&suppression.rule) {
            Some(rule) if rule == violation.rule => {}
            _ => return false,
        }
    }

    match suppression.suppression_type {
        SuppressionType::File => true,
        SuppressionType::Line => violation.line == suppression.line,
        SuppressionType::NextLine => violation.line == suppression.line + 1,
    }
}

/// Separate violations into active and suppressed based on suppressions.
pub fn filter_suppressed(
    violations: Vec<Violation>,
    suppressions: &[Suppression],
) -> (Vec<Violation>, Vec<SuppressedViolation>) {
    let mut active = Vec::new();
    let mut suppressed = Vec::new();

    for violation in violations {
        match suppressions
            .iter()
            .find(|s| matches_suppression(&violation, s))
        {
            Some(suppression) => suppressed.push(SuppressedViolation {
                violation,
                suppression: suppression.clone(),
            }),
            None => active.push(violation),
        }
    }

    (active, suppressed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violation(rule: ViolationRule, line: usize) -> Violation {
        Violation::new(rule, "main.cpp", line, "message".to_string())
    }

    #[test]
    fn test_parse_suppressions() {
        let content = r#"// Copyright
// paramlint:ignore-file line_length - Generated tables

int f(int a, int b) { return a; } // paramlint:ignore unused_parameter - Callback shape
"#;
        let suppressions = parse_suppressions("main.cpp", content);
        assert_eq!(suppressions.len(), 2);

        assert_eq!(suppressions[0].suppression_type, SuppressionType::File);
        assert_eq!(suppressions[0].rule, "line_length");
        assert_eq!(suppressions[0].reason, "Generated tables");
        assert_eq!(suppressions[0].line, 0);

        assert_eq!(suppressions[1].suppression_type, SuppressionType::Line);
        assert_eq!(suppressions[1].line, 4);
    }

    #[test]
    fn test_parse_next_line_forms() {
        let content = "# paramlint:ignore-next-line pending_marker\nx\n  // paramlint:ignore *\nvoid f(int a) {}\n/* paramlint:ignore undocumented_parameter - legacy */\n";
        let suppressions = parse_suppressions("tool.py", content);
        assert_eq!(suppressions.len(), 3);
        assert!(suppressions
            .iter()
            .all(|s| s.suppression_type == SuppressionType::NextLine));
        assert_eq!(suppressions[1].rule, "*");
        assert_eq!(suppressions[2].rule, "undocumented_parameter");
        assert_eq!(suppressions[2].reason, "legacy");
    }

    #[test]
    fn test_file_suppression_must_be_near_top() {
        let mut content = "int x;\n".repeat(12);
        content.push_str("// paramlint:ignore-file line_length\n");
        assert!(parse_suppressions("a.c", &content).is_empty());
    }

    #[test]
    fn test_matches_suppression() {
        let v = violation(ViolationRule::UnusedParameter, 5);

        let file_level = Suppression {
            rule: "unused_parameter".to_string(),
            reason: String::new(),
            file: "main.cpp".to_string(),
            line: 0,
            suppression_type: SuppressionType::File,
        };
        assert!(matches_suppression(&v, &file_level));

        let next_line = Suppression {
            line: 4,
            suppression_type: SuppressionType::NextLine,
            ..file_level.clone()
        };
        assert!(matches_suppression(&v, &next_line));

        let wrong_rule = Suppression {
            rule: "line_length".to_string(),
            ..file_level.clone()
        };
        assert!(!matches_suppression(&v, &wrong_rule));

        let unknown_rule = Suppression {
            rule: "no_such_rule".to_string(),
            ..file_level.clone()
        };
        assert!(!matches_suppression(&v, &unknown_rule));

        let wildcard = Suppression {
            rule: "*".to_string(),
            ..file_level
        };
        assert!(matches_suppression(&v, &wildcard));
    }

    #[test]
    fn test_filter_suppressed() {
        let violations = vec![
            violation(ViolationRule::UnusedParameter, 3),
            violation(ViolationRule::LineLength, 3),
        ];
        let suppressions = parse_suppressions(
            "main.cpp",
            "\n// paramlint:ignore-next-line unused_parameter - shape\nvoid f(int a) {}\n",
        );
        let (active, suppressed) = filter_suppressed(violations, &suppressions);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].rule, ViolationRule::LineLength);
        assert_eq!(suppressed.len(), 1);
        assert_eq!(suppressed[0].suppression.reason, "shape");
    }
}
