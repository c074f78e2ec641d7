//! The single-pass driver: one locator cursor per text, one
//! [`FunctionRecord`] per definition.

use serde::Serialize;
use tracing::debug;

use super::body::{extract_brace_body, ExtractedBody};
use super::comment::extract_header_comment;
use super::error::ScanError;
use super::locator::{DefinitionMatch, Locator};
use super::params::{split_parameters, ParamSpec};

/// Everything derived from one located definition.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionRecord<'a> {
    pub definition: DefinitionMatch<'a>,
    /// 1-based line of the first byte of the header.
    pub line: usize,
    /// `None` for declarations and for bodies that never close.
    pub body: Option<ExtractedBody<'a>>,
    /// Why `body` is missing on a definition, if it is.
    #[serde(skip)]
    pub body_error: Option<ScanError>,
    pub header_comment: Option<String>,
    pub params: Vec<ParamSpec<'a>>,
}

impl<'a> FunctionRecord<'a> {
    /// Clean names of the declared parameters, in declaration order.
    pub fn declared_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.params.iter().filter_map(|p| p.clean_name.as_deref())
    }

    pub fn name(&self) -> &'a str {
        self.definition.qualified_name
    }

    pub fn is_declaration(&self) -> bool {
        self.definition.is_declaration_only
    }
}

/// Byte offset to line number lookup.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    /// 1-based line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.starts.partition_point(|&start| start <= offset)
    }
}

/// Iterator over every definition in a text, left to right.
///
/// The cursor always moves forward: past the closing brace of a body, past
/// the `;` of a declaration, or one byte past an opening brace that never
/// balances. A truncated text therefore still yields every definition before
/// the truncation point and then stops.
pub struct DefinitionScanner<'a> {
    text: &'a str,
    locator: Locator,
    lines: LineIndex,
    cursor: usize,
}

impl<'a> DefinitionScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self::with_locator(text, Locator::new())
    }

    pub fn with_locator(text: &'a str, locator: Locator) -> Self {
        Self {
            text,
            locator,
            lines: LineIndex::new(text),
            cursor: 0,
        }
    }
}

impl<'a> Iterator for DefinitionScanner<'a> {
    type Item = FunctionRecord<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let definition = self.locator.find_next(self.text, self.cursor)?;
        let brace = definition.body_start_offset;

        let (body, body_error) = if definition.is_declaration_only {
            self.cursor = brace + 1;
            (None, None)
        } else {
            match extract_brace_body(self.text, brace) {
                Ok(body) => {
                    self.cursor = body.end_offset;
                    (Some(body), None)
                }
                Err(err) => {
                    debug!(
                        name = definition.qualified_name,
                        offset = brace,
                        "{}, resuming after the brace",
                        err
                    );
                    self.cursor = brace + 1;
                    (None, Some(err))
                }
            }
        };

        Some(FunctionRecord {
            line: self.lines.line_of(definition.start_offset),
            header_comment: extract_header_comment(self.text, definition.start_offset),
            params: split_parameters(definition.parameter_text),
            definition,
            body,
            body_error,
        })
    }
}
