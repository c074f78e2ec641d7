//! Header-comment `\param` consistency.

use crate::scan::{find_documentation_mismatches, FunctionRecord};

use super::types::{parameter_phrase, verb_for};
use super::{Violation, ViolationRule};

/// Up to two violations per definition or declaration: one for parameters
/// the header comment never mentions, one for documented names the
/// signature does not declare.
pub fn detect_documentation_mismatches(
    file: &str,
    records: &[FunctionRecord<'_>],
) -> Vec<Violation> {
    let mut violations = Vec::new();

    for record in records {
        let mismatches = find_documentation_mismatches(record);

        if !mismatches.missing.is_empty() {
            let names: Vec<String> = mismatches.missing.into_iter().collect();
            let message = format!(
                "Function '{}': {} not mentioned in the function header comment.",
                record.name(),
                parameter_phrase(&names)
            );
            violations.push(with_parameters(
                Violation::new(ViolationRule::UndocumentedParameter, file, record.line, message),
                record,
                names,
            ));
        }

        if !mismatches.extra.is_empty() {
            let names: Vec<String> = mismatches.extra.into_iter().collect();
            let message = format!(
                "Function '{}': {} documented in the header but {} not found in the function signature.",
                record.name(),
                parameter_phrase(&names),
                verb_for(names.len())
            );
            violations.push(with_parameters(
                Violation::new(ViolationRule::ExtraDocumentedParameter, file, record.line, message),
                record,
                names,
            ));
        }
    }

    violations
}

fn with_parameters(
    violation: Violation,
    record: &FunctionRecord<'_>,
    parameters: Vec<String>,
) -> Violation {
    Violation {
        function: Some(record.name().to_string()),
        parameters,
        ..violation
    }
}
