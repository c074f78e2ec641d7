//! Literal- and comment-aware byte scanner shared by every core scanner.
//!
//! The lexer walks the source from a starting offset and yields each byte
//! that lies in ordinary code, while string/char literals and comments are
//! reported as whole spans. Scanners that count braces, parentheses or commas
//! only ever look at [`Lexeme::Code`], so delimiters inside `"a { b }"` or
//! `/* } */` can never change their depth.
//!
//! States:
//!
//! - `Normal`: ordinary code.
//! - `InString(quote)`: until the matching quote with an even number of
//!   preceding backslashes.
//! - `InLineComment`: `//` (or a `#` that starts a line) until the newline.
//! - `InBlockComment`: `/*` until `*/`.
//!
//! A literal or comment that never closes consumes the rest of the text and
//! is flagged as unterminated instead of looping.

use serde::Serialize;

/// Kind of non-code span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TriviaKind {
    /// A string (`"`) or character (`'`) literal; carries the quote byte.
    Literal(u8),
    LineComment,
    BlockComment,
}

impl std::fmt::Display for TriviaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriviaKind::Literal(b'\'') => write!(f, "character literal"),
            TriviaKind::Literal(_) => write!(f, "string literal"),
            TriviaKind::LineComment => write!(f, "line comment"),
            TriviaKind::BlockComment => write!(f, "block comment"),
        }
    }
}

/// One step of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lexeme {
    /// A byte of ordinary code at the given offset.
    Code(usize, u8),
    /// A literal or comment covering `start..end`.
    Trivia {
        kind: TriviaKind,
        start: usize,
        end: usize,
        terminated: bool,
    },
}

/// Iterator over the lexemes of `text` from a given offset.
pub struct Lexer<'a> {
    src: &'a [u8],
    pos: usize,
    at_line_start: bool,
}

impl<'a> Lexer<'a> {
    /// Start lexing `text` at byte offset `start`.
    pub fn new(text: &'a str, start: usize) -> Self {
        let src = text.as_bytes();
        let start = start.min(src.len());
        let at_line_start = src[..start]
            .iter()
            .rev()
            .take_while(|&&b| b != b'\n')
            .all(|b| b.is_ascii_whitespace());
        Self {
            src,
            pos: start,
            at_line_start,
        }
    }

    /// Current offset (the next lexeme starts here).
    pub fn offset(&self) -> usize {
        self.pos
    }

    fn trivia(&mut self, kind: TriviaKind, start: usize, end: Option<usize>) -> Lexeme {
        let (end, terminated) = match end {
            Some(end) => (end, true),
            None => (self.src.len(), false),
        };
        self.pos = end;
        self.at_line_start = false;
        Lexeme::Trivia {
            kind,
            start,
            end,
            terminated,
        }
    }

    /// End offset (exclusive) of the literal opened by `quote` at `start`.
    fn literal_end(&self, start: usize, quote: u8) -> Option<usize> {
        let mut i = start + 1;
        while i < self.src.len() {
            match self.src[i] {
                b'\\' => i += 2,
                b if b == quote => return Some(i + 1),
                _ => i += 1,
            }
        }
        None
    }

    /// `1'000'000` and `0xFF'FF` digit separators are code, not char
    /// literals: the quote sits inside a token that starts with a digit.
    fn is_digit_separator(&self, at: usize) -> bool {
        if !self.src.get(at + 1).is_some_and(|b| b.is_ascii_hexdigit()) {
            return false;
        }
        let mut token_start = at;
        while token_start > 0 {
            let prev = self.src[token_start - 1];
            if prev.is_ascii_alphanumeric() || prev == b'\'' || prev == b'.' {
                token_start -= 1;
            } else {
                break;
            }
        }
        token_start < at && self.src[token_start].is_ascii_digit()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Lexeme;

    fn next(&mut self) -> Option<Lexeme> {
        let start = self.pos;
        let b = *self.src.get(start)?;

        match b {
            b'"' | b'\'' if !(b == b'\'' && self.is_digit_separator(start)) => {
                let end = self.literal_end(start, b);
                return Some(self.trivia(TriviaKind::Literal(b), start, end));
            }
            b'/' if self.src.get(start + 1) == Some(&b'/') => {
                let end = find_byte(self.src, start + 2, b'\n').unwrap_or(self.src.len());
                return Some(self.trivia(TriviaKind::LineComment, start, Some(end)));
            }
            b'/' if self.src.get(start + 1) == Some(&b'*') => {
                let end = find_seq(self.src, start + 2, b"*/").map(|i| i + 2);
                return Some(self.trivia(TriviaKind::BlockComment, start, end));
            }
            b'#' if self.at_line_start => {
                let end = find_byte(self.src, start + 1, b'\n').unwrap_or(self.src.len());
                return Some(self.trivia(TriviaKind::LineComment, start, Some(end)));
            }
            _ => {}
        }

        self.pos += 1;
        if b == b'\n' {
            self.at_line_start = true;
        } else if !b.is_ascii_whitespace() {
            self.at_line_start = false;
        }
        Some(Lexeme::Code(start, b))
    }
}

fn find_byte(src: &[u8], from: usize, needle: u8) -> Option<usize> {
    src.get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|i| i + from)
}

fn find_seq(src: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    src.get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

/// Copy of `text` where every literal and comment byte is replaced by a space.
///
/// Offsets are preserved, so the result can be matched against while still
/// reporting positions into the original text. Newlines inside block comments
/// are kept.
pub fn blank_trivia(text: &str) -> String {
    let mut out = Vec::with_capacity(text.len());
    for lexeme in Lexer::new(text, 0) {
        match lexeme {
            Lexeme::Code(_, b) => out.push(b),
            Lexeme::Trivia { start, end, .. } => {
                out.extend(
                    text.as_bytes()[start..end]
                        .iter()
                        .map(|&b| if b == b'\n' { b'\n' } else { b' ' }),
                );
            }
        }
    }
    // Trivia spans start and end on ASCII delimiters, so whole characters are
    // either copied or blanked and the buffer stays valid UTF-8.
    String::from_utf8(out).unwrap_or_default()
}
