//! Balanced-body extraction.

use serde::Serialize;

use super::error::ScanError;
use super::lexer::{Lexeme, Lexer};

/// The text between an opening brace and its matching closing brace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExtractedBody<'a> {
    /// Body text, excluding both braces.
    pub text: &'a str,
    /// Offset just past the closing brace.
    pub end_offset: usize,
}

/// Extract the body whose opening brace sits at `open_brace`.
///
/// Depth starts at 1 and only changes on braces in ordinary code, so braces
/// inside string/char literals and comments never affect the boundary.
pub fn extract_brace_body(text: &str, open_brace: usize) -> Result<ExtractedBody<'_>, ScanError> {
    let mut depth = 1usize;

    for lexeme in Lexer::new(text, open_brace + 1) {
        match lexeme {
            Lexeme::Code(_, b'{') => depth += 1,
            Lexeme::Code(pos, b'}') => {
                depth -= 1;
                if depth == 0 {
                    return Ok(ExtractedBody {
                        text: &text[open_brace + 1..pos],
                        end_offset: pos + 1,
                    });
                }
            }
            Lexeme::Code(..) => {}
            Lexeme::Trivia {
                kind,
                start,
                terminated: false,
                ..
            } => return Err(ScanError::UnterminatedLiteral { kind, start }),
            Lexeme::Trivia { .. } => {}
        }
    }

    Err(ScanError::UnterminatedBody { open_brace })
}
