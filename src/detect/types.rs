//! Core types for detection results.

use serde::{Deserialize, Serialize};

/// Severity levels for violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Rule names for different violation types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationRule {
    #[serde(rename = "unused_parameter")]
    UnusedParameter,
    #[serde(rename = "undocumented_parameter")]
    UndocumentedParameter,
    #[serde(rename = "extra_documented_parameter")]
    ExtraDocumentedParameter,
    #[serde(rename = "line_length")]
    LineLength,
    #[serde(rename = "pending_marker")]
    PendingMarker,
}

impl ViolationRule {
    pub const ALL: [ViolationRule; 5] = [
        ViolationRule::UnusedParameter,
        ViolationRule::UndocumentedParameter,
        ViolationRule::ExtraDocumentedParameter,
        ViolationRule::LineLength,
        ViolationRule::PendingMarker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationRule::UnusedParameter => "unused_parameter",
            ViolationRule::UndocumentedParameter => "undocumented_parameter",
            ViolationRule::ExtraDocumentedParameter => "extra_documented_parameter",
            ViolationRule::LineLength => "line_length",
            ViolationRule::PendingMarker => "pending_marker",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|rule| rule.as_str() == s)
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            ViolationRule::UnusedParameter
            | ViolationRule::UndocumentedParameter
            | ViolationRule::ExtraDocumentedParameter => Severity::Error,
            ViolationRule::LineLength => Severity::Warning,
            ViolationRule::PendingMarker => Severity::Info,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ViolationRule::UnusedParameter => "Parameter declared but never referenced",
            ViolationRule::UndocumentedParameter => {
                "Parameter not mentioned in the header comment"
            }
            ViolationRule::ExtraDocumentedParameter => {
                "Documented parameter missing from the signature"
            }
            ViolationRule::LineLength => "Line exceeds the configured length",
            ViolationRule::PendingMarker => "TODO/FIXME/HACK marker",
        }
    }
}

impl std::fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single detected issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: ViolationRule,
    pub message: String,
    pub file: String,
    pub line: usize,
    pub severity: Severity,
    /// Qualified name of the function the violation belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// Sorted parameter names, for parameter rules.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<String>,
}

impl Violation {
    /// A violation with the rule's default severity.
    pub fn new(rule: ViolationRule, file: &str, line: usize, message: String) -> Self {
        Self {
            rule,
            message,
            file: file.to_string(),
            line,
            severity: rule.default_severity(),
            function: None,
            parameters: Vec::new(),
        }
    }

    /// Create a unique key for this violation (for deduplication/comparison).
    pub fn key(&self) -> String {
        format!("{}|{}|{}|{}", self.rule, self.file, self.line, self.message)
    }
}

/// Results of running detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    pub violations: Vec<Violation>,
    /// Violations that were suppressed by inline comments
    #[serde(default)]
    pub suppressed: Vec<super::SuppressedViolation>,
    /// Number of files scanned
    pub scanned: usize,
    /// Number of function definitions and declarations found
    #[serde(default)]
    pub functions: usize,
}

impl DetectionResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: DetectionResult) {
        self.violations.extend(other.violations);
        self.suppressed.extend(other.suppressed);
        self.scanned += other.scanned;
        self.functions += other.functions;
    }

    /// Number of suppressed violations.
    pub fn suppressed_count(&self) -> usize {
        self.suppressed.len()
    }

    /// Check if there are any error-severity violations.
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Violation count per severity: (errors, warnings, infos).
    pub fn severity_counts(&self) -> (usize, usize, usize) {
        self.violations
            .iter()
            .fold((0, 0, 0), |(e, w, i), v| match v.severity {
                Severity::Error => (e + 1, w, i),
                Severity::Warning => (e, w + 1, i),
                Severity::Info => (e, w, i + 1),
            })
    }
}

/// Quote and join names the way messages list them:
/// `'a'`, `'a' and 'b'`, `'a', 'b', and 'c'`.
pub fn quoted_list<S: AsRef<str>>(names: &[S]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{}'", n.as_ref())).collect();
    match quoted.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// "The parameter 'a' is" / "The parameters 'a' and 'b' are".
pub fn parameter_phrase<S: AsRef<str>>(names: &[S]) -> String {
    if names.len() == 1 {
        format!("The parameter {} {}", quoted_list(names), verb_for(1))
    } else {
        format!("The parameters {} {}", quoted_list(names), verb_for(names.len()))
    }
}

/// "is" for one item, "are" otherwise.
pub fn verb_for(count: usize) -> &'static str {
    if count == 1 {
        "is"
    } else {
        "are"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_round_trip() {
        for rule in ViolationRule::ALL {
            assert_eq!(ViolationRule::parse(rule.as_str()), Some(rule));
        }
        assert_eq!(ViolationRule::parse("forbidden_pattern"), None);
    }

    #[test]
    fn test_quoted_list() {
        assert_eq!(quoted_list::<&str>(&[]), "");
        assert_eq!(quoted_list(&["a"]), "'a'");
        assert_eq!(quoted_list(&["a", "b"]), "'a' and 'b'");
        assert_eq!(quoted_list(&["a", "b", "c"]), "'a', 'b', and 'c'");
    }

    #[test]
    fn test_parameter_phrase() {
        assert_eq!(parameter_phrase(&["x"]), "The parameter 'x' is");
        assert_eq!(parameter_phrase(&["x", "y"]), "The parameters 'x' and 'y' are");
    }

    #[test]
    fn test_severity_counts() {
        let mut result = DetectionResult::new();
        result.violations.push(Violation::new(
            ViolationRule::LineLength,
            "a.c",
            1,
            "long".to_string(),
        ));
        result.violations.push(Violation::new(
            ViolationRule::UnusedParameter,
            "a.c",
            2,
            "unused".to_string(),
        ));
        assert_eq!(result.severity_counts(), (1, 1, 0));
        assert!(result.has_errors());
    }
}
