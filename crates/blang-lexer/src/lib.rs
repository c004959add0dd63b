// BLang lexer -- tokenizer for the BLang programming language.

mod cursor;
mod escape;

use blang_common::error::{LexError, LexErrorKind};
use blang_common::span::Span;
use blang_common::token::{is_keyword, is_operator_start, longest_operator, Token, TokenKind};
use cursor::{Cursor, Mark};
use tracing::{debug, trace};

pub use escape::unescape;

/// Scan-time configuration for the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerOptions {
    /// Emit `Comment` tokens. When false, comments are still scanned (and an
    /// unterminated block comment is still reported) but produce no token.
    pub emit_comments: bool,
}

impl Default for LexerOptions {
    fn default() -> Self {
        Self {
            emit_comments: true,
        }
    }
}

/// The BLang lexer. Converts source text into a stream of tokens.
///
/// Wraps a [`Cursor`] for character-level iteration and implements
/// `Iterator<Item = Token>` so callers can consume tokens lazily
/// or collect them into a `Vec`. The iterator yields exactly one
/// `EndOfInput` token and then stops.
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    options: LexerOptions,
    /// Source was longer than the span limit; report it before `EndOfInput`.
    oversized: bool,
    /// Whether we have already emitted the `EndOfInput` token.
    emitted_eof: bool,
}

/// Largest source, in bytes, the lexer scans. Span offsets are `u32`.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source text with default options.
    pub fn new(source: &'src str) -> Self {
        Self::with_options(source, LexerOptions::default())
    }

    /// Create a new lexer with explicit options.
    ///
    /// A source longer than [`MAX_SOURCE_LEN`] is not scanned: it yields one
    /// `Error(SourceTooLarge)` token and then `EndOfInput`.
    pub fn with_options(source: &'src str, options: LexerOptions) -> Self {
        Self::with_limit(source, options, MAX_SOURCE_LEN)
    }

    fn with_limit(source: &'src str, options: LexerOptions, max_len: usize) -> Self {
        let oversized = source.len() > max_len;
        Self {
            cursor: Cursor::new(if oversized { "" } else { source }),
            options,
            oversized,
            emitted_eof: false,
        }
    }

    /// Convenience: tokenize the entire source into a `Vec<Token>`.
    ///
    /// The returned vector includes the final `EndOfInput` token.
    pub fn tokenize(source: &str) -> Vec<Token> {
        tokenize_with(source, LexerOptions::default())
    }

    /// Produce the next token, skipping whitespace and (if configured) comments.
    fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let start = self.cursor.mark();
            let Some(c) = self.cursor.peek() else {
                return self.build(TokenKind::EndOfInput, "", start);
            };

            let token = match c {
                '"' => self.lex_string(start),
                '/' if self.cursor.peek_next() == Some('/') => self.lex_line_comment(start),
                '/' if self.cursor.peek_next() == Some('*') => self.lex_block_comment(start),
                '0'..='9' => self.lex_number(start),
                c if is_ident_start(c) => self.lex_ident(start),
                c if is_operator_start(c) => self.lex_operator(start),
                c => self.lex_unexpected(c, start),
            };

            if token.kind == TokenKind::Comment && !self.options.emit_comments {
                continue;
            }
            return token;
        }
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    /// Skip whitespace characters. Newlines are insignificant in BLang.
    fn skip_whitespace(&mut self) {
        self.cursor.eat_while(char::is_whitespace);
    }

    /// Build a token that started at `start` and ends at the cursor.
    fn build(&self, kind: TokenKind, lexeme: &str, start: Mark) -> Token {
        Token::new(
            kind,
            lexeme,
            start.line,
            start.column,
            Span::new(start.pos, self.cursor.pos()),
        )
    }

    /// Build a token whose lexeme is the source text from `start` to the cursor.
    fn token(&self, kind: TokenKind, start: Mark) -> Token {
        self.build(kind, self.cursor.slice(start.pos, self.cursor.pos()), start)
    }

    /// Build an `Error` token covering the text from `start` to the cursor.
    fn error(&self, kind: LexErrorKind, start: Mark) -> Token {
        trace!(?kind, line = start.line, column = start.column, "lexical error");
        self.token(TokenKind::Error(kind), start)
    }

    // ── Identifiers and keywords ─────────────────────────────────────────

    /// Lex an identifier or keyword.
    fn lex_ident(&mut self, start: Mark) -> Token {
        self.cursor.advance(); // consume first char
        self.cursor.eat_while(is_ident_continue);
        let text = self.cursor.slice(start.pos, self.cursor.pos());

        let kind = if is_keyword(text) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.build(kind, text, start)
    }

    // ── Number literals ──────────────────────────────────────────────────

    /// Lex a decimal number: a digit run with an optional fractional part.
    ///
    /// A `.` is only consumed when a digit follows it, so `3.` lexes as `3`
    /// with scanning resuming at the `.`. A number running into identifier
    /// characters (`12abc`) is a single malformed-number error.
    fn lex_number(&mut self, start: Mark) -> Token {
        self.cursor.eat_while(|c| c.is_ascii_digit());

        if self.cursor.peek() == Some('.')
            && self
                .cursor
                .peek_next()
                .is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.advance(); // consume '.'
            self.cursor.eat_while(|c| c.is_ascii_digit());
        }

        if self.cursor.peek().is_some_and(is_ident_continue) {
            self.cursor.eat_while(is_ident_continue);
            return self.error(LexErrorKind::MalformedNumber, start);
        }

        self.token(TokenKind::Number, start)
    }

    // ── String literals ──────────────────────────────────────────────────

    /// Lex a double-quoted string literal.
    ///
    /// The token lexeme is the raw text between the quotes; the span covers
    /// the quotes too. Hitting a newline or end of input first yields an
    /// unterminated-string error that stops before the newline. An invalid
    /// escape turns the whole literal into one error token.
    fn lex_string(&mut self, start: Mark) -> Token {
        self.cursor.advance(); // consume opening '"'
        let content_start = self.cursor.pos();
        let mut bad_escape = None;

        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    return self.error(LexErrorKind::UnterminatedString, start);
                }
                Some('\r') if self.cursor.peek_next() == Some('\n') => {
                    return self.error(LexErrorKind::UnterminatedString, start);
                }
                Some('"') => {
                    let content_end = self.cursor.pos();
                    self.cursor.advance(); // consume closing '"'
                    if let Some(c) = bad_escape {
                        return self.error(LexErrorKind::InvalidEscapeSequence(c), start);
                    }
                    let content = self.cursor.slice(content_start, content_end);
                    return self.build(TokenKind::String, content, start);
                }
                Some('\\') => {
                    self.cursor.advance(); // consume '\'
                    match self.cursor.peek() {
                        // Left for the unterminated check.
                        None | Some('\n') => {}
                        Some('\r') if self.cursor.peek_next() == Some('\n') => {}
                        Some(c) => {
                            if escape::escape_value(c).is_none() {
                                bad_escape.get_or_insert(c);
                            }
                            self.cursor.advance(); // consume escaped char
                        }
                    }
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    // ── Comments ─────────────────────────────────────────────────────────

    /// Lex a `//` comment up to, not including, the line terminator.
    fn lex_line_comment(&mut self, start: Mark) -> Token {
        while let Some(c) = self.cursor.peek() {
            if c == '\n' || (c == '\r' && self.cursor.peek_next() == Some('\n')) {
                break;
            }
            self.cursor.advance();
        }
        self.token(TokenKind::Comment, start)
    }

    /// Lex a `/* ... */` comment. Block comments do not nest.
    fn lex_block_comment(&mut self, start: Mark) -> Token {
        self.cursor.advance(); // consume '/'
        self.cursor.advance(); // consume '*'

        loop {
            match self.cursor.peek() {
                None => return self.error(LexErrorKind::UnterminatedBlockComment, start),
                Some('*') if self.cursor.peek_next() == Some('/') => {
                    self.cursor.advance(); // consume '*'
                    self.cursor.advance(); // consume '/'
                    return self.token(TokenKind::Comment, start);
                }
                Some(_) => {
                    self.cursor.advance();
                }
            }
        }
    }

    // ── Operators ────────────────────────────────────────────────────────

    /// Lex the longest operator starting at the cursor.
    fn lex_operator(&mut self, start: Mark) -> Token {
        let Some(op) = longest_operator(self.cursor.rest()) else {
            let c = self.cursor.peek().unwrap_or_default();
            return self.lex_unexpected(c, start);
        };
        for _ in op.chars() {
            self.cursor.advance();
        }
        self.build(TokenKind::Operator, op, start)
    }

    // ── Unknown character (error recovery) ───────────────────────────────

    /// Consume one character that cannot start a token.
    fn lex_unexpected(&mut self, c: char, start: Mark) -> Token {
        self.cursor.advance();
        self.error(LexErrorKind::UnexpectedCharacter(c), start)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }

        if self.oversized {
            self.oversized = false;
            return Some(self.error(LexErrorKind::SourceTooLarge, self.cursor.mark()));
        }

        let token = self.next_token();
        if token.kind == TokenKind::EndOfInput {
            self.emitted_eof = true;
        }
        Some(token)
    }
}

/// Tokenize `source` with default options.
///
/// Never fails: lexical errors are `Error` tokens in the output, and the last
/// token is always `EndOfInput`. Sources over [`MAX_SOURCE_LEN`] bytes yield
/// a single `SourceTooLarge` error.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::tokenize(source)
}

/// Tokenize `source` with explicit options.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize_with(source: &str, options: LexerOptions) -> Vec<Token> {
    let tokens: Vec<Token> = Lexer::with_options(source, options).collect();
    debug!(
        tokens = tokens.len(),
        errors = tokens.iter().filter(|t| t.is_error()).count(),
        "tokenized"
    );
    tokens
}

/// The lexical errors in a token sequence, in source order.
pub fn errors(tokens: &[Token]) -> Vec<LexError> {
    tokens.iter().filter_map(Token::error).collect()
}

/// Whether a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Whether a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
