//! File-level checks built on the scanner.

mod docs;
mod line_length;
mod runner;
mod suppress;
mod todos;
mod types;
mod unused;

pub use docs::detect_documentation_mismatches;
pub use line_length::detect_long_lines;
pub use runner::Runner;
pub use suppress::{
    filter_suppressed, matches_suppression, parse_suppressions, SuppressedViolation, Suppression,
    SuppressionType,
};
pub use todos::{detect_pending_markers, marker_pattern};
pub use types::{
    parameter_phrase, quoted_list, verb_for, DetectionResult, Severity, Violation, ViolationRule,
};
pub use unused::detect_unused_parameters;
