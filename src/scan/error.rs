//! Recoverable scan conditions.

use thiserror::Error;

use super::lexer::TriviaKind;

/// Why a body could not be extracted.
///
/// Neither condition is fatal: the driver skips one byte past the opening
/// brace and resumes the signature search there.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// The opening brace never balances before the end of the text.
    #[error("body opened at offset {open_brace} is never closed")]
    UnterminatedBody { open_brace: usize },

    /// A literal or comment inside the body runs to the end of the text.
    #[error("{kind} starting at offset {start} is never closed")]
    UnterminatedLiteral { kind: TriviaKind, start: usize },
}
