//! Heuristic signature locator for C-family function definitions.
//!
//! A candidate header starts at the first non-blank byte of a line and has
//! the shape
//!
//! ```text
//! [return-type run] name ( parameters ) [qualifiers] [: initializer-list] { | ;
//! ```
//!
//! where `name` is a plain identifier (`f`), a scoped identifier
//! (`A::B::f`, `A::~A`) or an operator name (`operator==`, `A::operator[]`). Nothing here understands
//! classes, namespaces or templates as scopes: the locator only checks the
//! lexical shape, and a candidate that does not fit is skipped in favour of
//! the next line.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashSet;

use super::body::extract_brace_body;
use super::lexer::{Lexeme, Lexer};

/// Words that can never name a definition. This is what keeps control-flow
/// statements such as `if (x) {` or `while (y) {` from being read as one.
pub const RESERVED_NAMES: &[&str] = &[
    "if", "for", "while", "switch", "catch", "do", "try", "new", "delete", "sizeof", "return",
    "NULL", "class", "struct", "enum", "using",
];

/// Words that start a statement, so they cannot open a return-type run.
const STATEMENT_LEADERS: &[&str] = &[
    "return", "throw", "else", "case", "goto", "new", "delete", "co_return", "co_yield", "co_await",
];

/// Qualifiers accepted between the parameter list and the body.
const TRAILING_QUALIFIERS: &[&str] = &["const", "volatile", "noexcept", "override", "final"];

/// `= 0;`, `= default;`, `= delete;`
const DECLARATION_DEFAULTS: &[&[u8]] = &[b"0", b"default", b"delete"];

/// Overloadable operator symbols, longest first.
const OPERATOR_SYMBOLS: &[&str] = &[
    "->*", "<<=", ">>=", "<=>", "->", "==", "!=", "<=", ">=", "<<", ">>", "++", "--", "&&", "||",
    "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "+", "-", "*", "/", "%", "=", "<", ">", "&",
    "|", "^", "~", "!", ",",
];

static RESERVED: Lazy<HashSet<&'static str>> = Lazy::new(|| RESERVED_NAMES.iter().copied().collect());

/// One definition (or declaration) header found in the source.
///
/// All offsets point into the original, unmodified text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionMatch<'a> {
    /// Name as written, including any `Scope::` prefix.
    pub qualified_name: &'a str,
    /// Text between the parameter parentheses.
    pub parameter_text: &'a str,
    /// Constructor initializer list, starting at its `:`.
    pub initializer_list: Option<&'a str>,
    /// Offset of the opening `{`, or of the `;` for a declaration.
    pub body_start_offset: usize,
    /// True when the header ends in `;` instead of a body.
    pub is_declaration_only: bool,
    /// Offset of the first byte of the header (return type or name).
    pub start_offset: usize,
    /// Header text up to the qualifiers, excluding any initializer list.
    pub signature: &'a str,
}

impl<'a> DefinitionMatch<'a> {
    /// Last `::` segment of the name.
    pub fn simple_name(&self) -> &'a str {
        self.qualified_name
            .rsplit("::")
            .next()
            .unwrap_or(self.qualified_name)
    }

    /// Whether the name carries a scope or is an operator.
    pub fn is_qualified(&self) -> bool {
        self.qualified_name.contains("::") || is_operator_name(self.qualified_name)
    }
}

fn is_operator_name(name: &str) -> bool {
    let last = name.rsplit("::").next().unwrap_or(name);
    last.strip_prefix("operator")
        .is_some_and(|rest| !rest.starts_with(|c: char| c.is_ascii_alphanumeric() || c == '_'))
}

/// Configurable signature search.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locator {
    qualified_only: bool,
}

impl Locator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept `Scope::name` and operator definitions.
    pub fn qualified_only(mut self, yes: bool) -> Self {
        self.qualified_only = yes;
        self
    }

    /// Find the next definition header whose line starts at or after `cursor`.
    pub fn find_next<'a>(&self, text: &'a str, cursor: usize) -> Option<DefinitionMatch<'a>> {
        if cursor > text.len() {
            return None;
        }
        if is_line_start(text.as_bytes(), cursor) {
            if let Some(m) = self.match_at(text, cursor) {
                return Some(m);
            }
        }

        // Lex from the cursor itself: a newline inside a comment or literal
        // that opens later on the cursor's line never starts a candidate.
        for lexeme in Lexer::new(text, cursor) {
            if let Lexeme::Code(i, b'\n') = lexeme {
                if let Some(m) = self.match_at(text, i + 1) {
                    return Some(m);
                }
            }
        }
        None
    }

    /// Try to read a header starting on the line that begins at `line_start`.
    fn match_at<'a>(&self, text: &'a str, line_start: usize) -> Option<DefinitionMatch<'a>> {
        let bytes = text.as_bytes();
        let start = skip_inline_ws(bytes, line_start);
        if !bytes.get(start).is_some_and(|&b| is_ident_start(b)) {
            return None;
        }

        let header = read_header_words(text, start)?;
        let name = header.words.last()?;
        let qualified_name = &text[name.start..name.end];

        let first_segment = qualified_name
            .trim_start_matches('~')
            .split("::")
            .next()
            .unwrap_or("");
        if RESERVED.contains(first_segment) {
            return None;
        }
        if header.words.len() > 1 {
            let leader = &text[header.words[0].start..header.words[0].end];
            if STATEMENT_LEADERS.contains(&leader) {
                return None;
            }
        }
        if self.qualified_only && !(qualified_name.contains("::") || name.operator) {
            return None;
        }

        let open_paren = header.open_paren;
        let close_paren = matching_paren(text, open_paren)?;
        let parameter_text = &text[open_paren + 1..close_paren];

        let after_params = skip_qualifiers(text, close_paren + 1)?;
        let signature = text[start..after_params].trim_end();
        let at = skip_space(bytes, after_params);

        let (body_start_offset, is_declaration_only, initializer_list) = match bytes.get(at)? {
            b'{' => (at, false, None),
            b';' => (at, true, None),
            b'=' => (deleted_or_pure(bytes, at)?, true, None),
            b':' if bytes.get(at + 1) != Some(&b':') => {
                let brace = initializer_list_end(text, at + 1)?;
                (brace, false, Some(text[at..brace].trim_end()))
            }
            _ => return None,
        };

        Some(DefinitionMatch {
            qualified_name,
            parameter_text,
            initializer_list,
            body_start_offset,
            is_declaration_only,
            start_offset: start,
            signature,
        })
    }
}

/// Find the next definition at or after `cursor` with the default locator.
pub fn find_next_definition(text: &str, cursor: usize) -> Option<DefinitionMatch<'_>> {
    Locator::new().find_next(text, cursor)
}

/// A name-like word in the header: an identifier, scoped name or operator.
#[derive(Debug, Clone, Copy)]
struct Word {
    start: usize,
    end: usize,
    operator: bool,
}

struct Header {
    words: Vec<Word>,
    open_paren: usize,
}

/// Read `[type words] name` up to the `(` of the parameter list.
fn read_header_words(text: &str, start: usize) -> Option<Header> {
    let bytes = text.as_bytes();
    let mut words = Vec::new();
    let mut angle = 0usize;
    let mut after_word = false;
    let mut i = start;

    loop {
        i = skip_space(bytes, i);
        let b = *bytes.get(i)?;
        match b {
            b'(' => {
                // `std::function<void(int)> cb;` opens a paren inside a template.
                if angle > 0 || !after_word {
                    return None;
                }
                return Some(Header {
                    words,
                    open_paren: i,
                });
            }
            b'[' if bytes.get(i + 1) == Some(&b'[') => {
                i = find_from(bytes, i + 2, b"]]")? + 2;
            }
            b'*' | b'&' => {
                after_word = false;
                i += 1;
            }
            b',' if angle > 0 => {
                after_word = false;
                i += 1;
            }
            b'<' => {
                angle += 1;
                after_word = false;
                i += 1;
            }
            b'>' => {
                angle = angle.checked_sub(1)?;
                after_word = false;
                i += 1;
            }
            b'~' | b'_' | b'A'..=b'Z' | b'a'..=b'z' => {
                let word = read_name(text, i)?;
                i = word.end;
                words.push(word);
                after_word = true;
                if word.operator {
                    i = skip_space(bytes, i);
                    if bytes.get(i) != Some(&b'(') {
                        return None;
                    }
                }
            }
            b'0'..=b'9' if angle > 0 => {
                after_word = false;
                while bytes.get(i).is_some_and(|&b| is_ident_byte(b)) {
                    i += 1;
                }
            }
            _ => return None,
        }
    }
}

/// Read `(~)?Ident(::(~)?Ident)*`, or a name ending in `operator <symbol>`.
fn read_name(text: &str, start: usize) -> Option<Word> {
    let bytes = text.as_bytes();
    let mut i = start;

    loop {
        if bytes.get(i) == Some(&b'~') {
            i += 1;
        }
        if !bytes.get(i).is_some_and(|&b| is_ident_start(b)) {
            return None;
        }
        let seg_start = i;
        while bytes.get(i).is_some_and(|&b| is_ident_byte(b)) {
            i += 1;
        }

        if &text[seg_start..i] == "operator" {
            let end = operator_symbol_end(text, skip_inline_ws(bytes, i))?;
            return Some(Word {
                start,
                end,
                operator: true,
            });
        }

        let continues = bytes.get(i..i + 2) == Some(b"::".as_slice())
            && bytes
                .get(i + 2)
                .is_some_and(|&b| is_ident_start(b) || b == b'~');
        if !continues {
            return Some(Word {
                start,
                end: i,
                operator: false,
            });
        }
        i += 2;
    }
}

/// End offset of the operator symbol starting at `at`.
fn operator_symbol_end(text: &str, at: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    match *bytes.get(at)? {
        b'(' | b'[' => {
            let close = if bytes[at] == b'(' { b')' } else { b']' };
            let inner = skip_inline_ws(bytes, at + 1);
            return (bytes.get(inner) == Some(&close)).then_some(inner + 1);
        }
        b if is_ident_start(b) => {
            let mut end = at;
            while bytes.get(end).is_some_and(|&b| is_ident_byte(b)) {
                end += 1;
            }
            let word = &text[at..end];
            if word != "new" && word != "delete" {
                return None;
            }
            // `operator new[]`
            let after = skip_inline_ws(bytes, end);
            if bytes.get(after..after + 2) == Some(b"[]".as_slice()) {
                return Some(after + 2);
            }
            return Some(end);
        }
        _ => {}
    }
    let rest = &text[at..];
    OPERATOR_SYMBOLS
        .iter()
        .find(|sym| rest.starts_with(**sym))
        .map(|sym| at + sym.len())
}

/// Offset of the `)` matching the `(` at `open`.
///
/// Parentheses inside literals and comments are ignored. A `;` outside any
/// nested brace means the region is a statement, not a parameter list.
fn matching_paren(text: &str, open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut braces = 0usize;
    for lexeme in Lexer::new(text, open) {
        match lexeme {
            Lexeme::Code(_, b'(') => depth += 1,
            Lexeme::Code(i, b')') => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            Lexeme::Code(_, b'{') => braces += 1,
            Lexeme::Code(_, b'}') => braces = braces.checked_sub(1)?,
            Lexeme::Code(_, b';') if braces == 0 => return None,
            Lexeme::Trivia {
                terminated: false, ..
            } => return None,
            _ => {}
        }
    }
    None
}

/// Skip `const`, `noexcept(...)`, ref-qualifiers and a trailing return type.
fn skip_qualifiers(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;

    loop {
        let at = skip_space(bytes, i);
        match bytes.get(at) {
            Some(&b) if is_ident_start(b) => {
                let mut end = at;
                while bytes.get(end).is_some_and(|&b| is_ident_byte(b)) {
                    end += 1;
                }
                if !TRAILING_QUALIFIERS.contains(&&text[at..end]) {
                    return Some(i);
                }
                i = end;
                let next = skip_space(bytes, i);
                if &text[at..end] == "noexcept" && bytes.get(next) == Some(&b'(') {
                    i = matching_paren(text, next)? + 1;
                }
            }
            Some(b'&') => i = at + 1,
            Some(b'-') if bytes.get(at + 1) == Some(&b'>') => {
                i = at + 2;
                while bytes.get(i).is_some_and(|&b| {
                    is_ident_byte(b) || b.is_ascii_whitespace() || b"<>:*&,".contains(&b)
                }) {
                    i += 1;
                }
            }
            _ => return Some(i),
        }
    }
}

/// For `= 0;`, `= default;` and `= delete;`, the offset of the `;`.
fn deleted_or_pure(bytes: &[u8], eq: usize) -> Option<usize> {
    let at = skip_space(bytes, eq + 1);
    let rest = bytes.get(at..)?;
    let len = DECLARATION_DEFAULTS
        .iter()
        .find(|word| {
            rest.starts_with(word) && !rest.get(word.len()).is_some_and(|&b| is_ident_byte(b))
        })?
        .len();
    let semi = skip_space(bytes, at + len);
    (bytes.get(semi) == Some(&b';')).then_some(semi)
}

/// Walk a constructor initializer list (`a_(a), b_{b}`) and return the
/// offset of the body brace that follows it.
fn initializer_list_end(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = from;

    loop {
        i = skip_space(bytes, i);
        let member = read_name(text, i)?;
        if member.operator {
            return None;
        }
        i = skip_space(bytes, member.end);

        if bytes.get(i) == Some(&b'<') {
            i = skip_template_args(bytes, i)?;
            i = skip_space(bytes, i);
        }

        i = match bytes.get(i)? {
            b'(' => matching_paren(text, i)? + 1,
            b'{' => extract_brace_body(text, i).ok()?.end_offset,
            _ => return None,
        };
        i = skip_space(bytes, i);

        if bytes.get(i..i + 3) == Some(b"...".as_slice()) {
            i = skip_space(bytes, i + 3);
        }

        match bytes.get(i)? {
            b',' => i += 1,
            b'{' => return Some(i),
            _ => return None,
        }
    }
}

fn skip_template_args(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (offset, &b) in bytes.get(open..)?.iter().enumerate() {
        match b {
            b'<' => depth += 1,
            b'>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + offset + 1);
                }
            }
            b';' | b'{' | b'}' => return None,
            _ => {}
        }
    }
    None
}

fn is_line_start(bytes: &[u8], offset: usize) -> bool {
    offset == 0 || bytes.get(offset - 1) == Some(&b'\n')
}

/// Skip whitespace and comments.
fn skip_space(bytes: &[u8], mut i: usize) -> usize {
    loop {
        while bytes.get(i).is_some_and(|b| b.is_ascii_whitespace()) {
            i += 1;
        }
        match bytes.get(i..i + 2) {
            Some(b"//") => {
                i = find_from(bytes, i + 2, b"\n").unwrap_or(bytes.len());
            }
            Some(b"/*") => {
                i = find_from(bytes, i + 2, b"*/").map_or(bytes.len(), |e| e + 2);
            }
            _ => return i,
        }
    }
}

fn skip_inline_ws(bytes: &[u8], mut i: usize) -> usize {
    while bytes
        .get(i)
        .is_some_and(|&b| b == b' ' || b == b'\t' || b == b'\r' || b == b'\x0c')
    {
        i += 1;
    }
    i
}

fn find_from(bytes: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    bytes
        .get(from..)?
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|i| i + from)
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
