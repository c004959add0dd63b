use std::fmt;

use serde::Serialize;

use crate::span::Span;

/// A lexical error with location information.
///
/// The lexer never returns these directly: malformed input becomes an
/// `Error` token in the normal output. `LexError` is the value form callers
/// get back from [`Token::error`](crate::token::Token::error) when they want
/// to report or propagate the problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
    /// 1-based line of the first character of the offending text.
    pub line: u32,
    /// 1-based column, in characters, of the first character of the offending text.
    pub column: u32,
}

impl LexError {
    /// Create a new lexical error.
    pub fn new(kind: LexErrorKind, span: Span, line: u32, column: u32) -> Self {
        Self {
            kind,
            span,
            line,
            column,
        }
    }
}

/// The specific kind of lexical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LexErrorKind {
    /// A character that cannot start any token.
    UnexpectedCharacter(char),
    /// A string literal was not closed before a newline or end of input.
    UnterminatedString,
    /// A block comment (`/* ... */`) was not closed before end of input.
    UnterminatedBlockComment,
    /// A backslash in a string literal followed by something other than
    /// `"`, `\`, `n` or `t`.
    InvalidEscapeSequence(char),
    /// A digit run running straight into identifier characters, e.g. `12abc`.
    MalformedNumber,
    /// The source is longer than byte offsets in a span can address (4 GiB).
    SourceTooLarge,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(c) => write!(f, "unexpected character {c:?}"),
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::UnterminatedBlockComment => write!(f, "unterminated block comment"),
            Self::InvalidEscapeSequence(c) => write!(f, "invalid escape sequence: \\{c}"),
            Self::MalformedNumber => write!(f, "malformed numeric literal"),
            Self::SourceTooLarge => write!(f, "source too large to tokenize (limit is 4 GiB)"),
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.kind)
    }
}

impl std::error::Error for LexError {}
