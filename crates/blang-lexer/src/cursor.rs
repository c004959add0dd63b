/// Character-level source iterator for the BLang lexer.
///
/// The cursor wraps a source string and provides character-by-character
/// iteration. It tracks a byte offset into the source alongside a 1-based
/// line and a 1-based column counted in characters. Reading past the end is
/// never an error: lookahead simply returns `None`.
pub struct Cursor<'src> {
    source: &'src str,
    pos: u32,
    line: u32,
    column: u32,
    chars: std::str::Chars<'src>,
}

/// A saved cursor position, taken at the start of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pub pos: u32,
    pub line: u32,
    pub column: u32,
}

impl<'src> Cursor<'src> {
    /// Create a new cursor at the start of the source text.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            chars: source.chars(),
        }
    }

    /// Look at the current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.chars.clone().next()
    }

    /// Look at the character after the current one without consuming anything.
    pub fn peek_next(&self) -> Option<char> {
        self.peek_nth(1)
    }

    /// Look `k` characters ahead; `peek_nth(0)` is `peek()`.
    pub fn peek_nth(&self, k: usize) -> Option<char> {
        self.chars.clone().nth(k)
    }

    /// Consume the current character and advance the position.
    ///
    /// A consumed `\n` moves to column 1 of the next line.
    /// Returns the consumed character, or `None` if at end of input.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.pos += c.len_utf8() as u32;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Current byte position in the source text.
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Current position as a [`Mark`].
    pub fn mark(&self) -> Mark {
        Mark {
            pos: self.pos,
            line: self.line,
            column: self.column,
        }
    }

    /// Whether there are no more characters to consume.
    #[cfg(test)]
    pub fn is_eof(&self) -> bool {
        self.peek().is_none()
    }

    /// Advance while the predicate holds for the current character.
    pub fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if predicate(c) {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// The unconsumed remainder of the source.
    pub fn rest(&self) -> &'src str {
        self.chars.as_str()
    }

    /// Extract a slice of the source text by byte offsets.
    ///
    /// # Panics
    ///
    /// Panics if start or end are out of bounds or not on UTF-8 boundaries.
    pub fn slice(&self, start: u32, end: u32) -> &'src str {
        &self.source[start as usize..end as usize]
    }
}
