//! Cross-referencers: declared parameters against body usage and against
//! the `\param` tags of the header comment.

use std::collections::{BTreeSet, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use super::lexer::blank_trivia;
use super::record::FunctionRecord;

lazy_static! {
    /// `\param name`, `@param name`, `\param[in,out] name`, `@param {int} name`.
    static ref PARAM_TAG: Regex = Regex::new(
        r"[\\@]param(?:\s*\[[^\]]*\])?(?:\s*\{[^}]*\})?\s+([A-Za-z_][A-Za-z0-9_]*)"
    ).unwrap();

    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();

    /// `/**`, ` * `, `*/`, `///`, `//!`, `#` at the start of a comment line.
    static ref LINE_DECORATION: Regex = Regex::new(r"(?m)^[ \t]*(?:/\*+|\*+/?|//+!?|#)").unwrap();
}

/// Declared parameters with no reference in the initializer list or body.
///
/// Declarations and unterminated bodies have nothing to check, so the result
/// is empty for them.
pub fn find_unused_parameters(record: &FunctionRecord<'_>) -> BTreeSet<String> {
    let Some(body) = record.body else {
        return BTreeSet::new();
    };

    let initializer_words = record
        .definition
        .initializer_list
        .map(word_set)
        .unwrap_or_default();
    let blanked = blank_trivia(body.text);
    let body_words = word_set(&blanked);

    record
        .declared_names()
        .filter(|name| !initializer_words.contains(*name) && !body_words.contains(*name))
        .map(str::to_string)
        .collect()
}

/// Parameters missing from, or only present in, the header comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocMismatches {
    /// Declared in the signature but never documented.
    pub missing: BTreeSet<String>,
    /// Documented but not declared in the signature.
    pub extra: BTreeSet<String>,
}

impl DocMismatches {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty()
    }
}

/// Compare the declared parameter names against the documented ones.
///
/// A definition without a header comment documents nothing, so every
/// declared parameter is reported missing.
pub fn find_documentation_mismatches(record: &FunctionRecord<'_>) -> DocMismatches {
    let declared: BTreeSet<String> = record.declared_names().map(str::to_string).collect();
    let documented = record
        .header_comment
        .as_deref()
        .map(documented_parameters)
        .unwrap_or_default();

    DocMismatches {
        missing: declared.difference(&documented).cloned().collect(),
        extra: documented.difference(&declared).cloned().collect(),
    }
}

/// Names tagged with `\param` or `@param` in a comment block.
///
/// Comment decorations are stripped line by line first, so a tag may wrap
/// onto the next ` * ` or `///` line.
pub fn documented_parameters(comment: &str) -> BTreeSet<String> {
    let undecorated = LINE_DECORATION.replace_all(comment, " ");
    let collapsed = WHITESPACE.replace_all(&undecorated, " ");
    PARAM_TAG
        .captures_iter(&collapsed)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// The identifier tokens of `text`, split on every non-word character.
///
/// Splitting on `::`, `->` and `.` falls out of this, so `this->a` and
/// `Foo::a` both contain the word `a`.
fn word_set(text: &str) -> HashSet<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect()
}
