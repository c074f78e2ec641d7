//! Unused-parameter detection.

use crate::scan::{find_unused_parameters, FunctionRecord};

use super::types::parameter_phrase;
use super::{Violation, ViolationRule};

/// One violation per definition that has unused parameters.
///
/// Declarations and definitions whose body never closes are skipped.
pub fn detect_unused_parameters(file: &str, records: &[FunctionRecord<'_>]) -> Vec<Violation> {
    records
        .iter()
        .filter_map(|record| {
            let unused: Vec<String> = find_unused_parameters(record).into_iter().collect();
            if unused.is_empty() {
                return None;
            }
            let message = format!(
                "Function '{}': {} defined but not used in the function body.",
                record.name(),
                parameter_phrase(&unused)
            );
            Some(Violation {
                function: Some(record.name().to_string()),
                parameters: unused,
                ..Violation::new(ViolationRule::UnusedParameter, file, record.line, message)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::DefinitionScanner;

    fn detect(text: &str) -> Vec<Violation> {
        let records: Vec<_> = DefinitionScanner::new(text).collect();
        detect_unused_parameters("sample.cpp", &records)
    }

    #[test]
    fn test_single_unused() {
        let violations = detect("int add(int a, int b) { return a; }");
        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.rule, ViolationRule::UnusedParameter);
        assert_eq!(v.parameters, vec!["b"]);
        assert_eq!(v.function.as_deref(), Some("add"));
        assert_eq!(v.line, 1);
        assert_eq!(
            v.message,
            "Function 'add': The parameter 'b' is defined but not used in the function body."
        );
    }

    #[test]
    fn test_aggregated_and_sorted() {
        let violations = detect("\n\nvoid Shape::draw(int z, int y, int x) {\n  render();\n}\n");
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].line, 3);
        assert_eq!(violations[0].parameters, vec!["x", "y", "z"]);
        assert!(violations[0]
            .message
            .contains("The parameters 'x', 'y', and 'z' are defined"));
    }

    #[test]
    fn test_declarations_ignored() {
        assert!(detect("void f(int a);\nvoid g(int b) { b++; }").is_empty());
    }
}
