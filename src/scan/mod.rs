//! Grammar-free scanning of C-family source text.
//!
//! Every function here works on an in-memory `&str` and never fails
//! fatally: malformed input yields fewer records, not an error or a hang.
//! All offsets are positions in the original text.

mod body;
mod comment;
mod error;
mod lexer;
mod locator;
mod params;
mod record;
mod xref;

pub use body::{extract_brace_body, ExtractedBody};
pub use comment::extract_header_comment;
pub use error::ScanError;
pub use lexer::{blank_trivia, Lexeme, Lexer, TriviaKind};
pub use locator::{find_next_definition, DefinitionMatch, Locator, RESERVED_NAMES};
pub use params::{parameter_names, resolve_parameter_name, split_parameters, ParamSpec};
pub use record::{DefinitionScanner, FunctionRecord, LineIndex};
pub use xref::{
    documented_parameters, find_documentation_mismatches, find_unused_parameters, DocMismatches,
};
