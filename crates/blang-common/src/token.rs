use std::fmt;
use std::sync::OnceLock;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::error::{LexError, LexErrorKind};
use crate::span::Span;

/// A token produced by the BLang lexer.
///
/// `line` and `column` are 1-based and mark the first character of the token
/// (for strings, the opening quote). `column` counts characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Source text of the token. For `String` tokens this is the raw text
    /// between the quotes; for `Error` tokens it is the offending text.
    pub lexeme: String,
    pub line: u32,
    pub column: u32,
    /// Byte span of the whole token in the source, delimiters included.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        line: u32,
        column: u32,
        span: Span,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            line,
            column,
            span,
        }
    }

    /// Whether this is an `Error` token.
    pub fn is_error(&self) -> bool {
        matches!(self.kind, TokenKind::Error(_))
    }

    /// The lexical error carried by an `Error` token, if any.
    pub fn error(&self) -> Option<LexError> {
        match self.kind {
            TokenKind::Error(kind) => Some(LexError::new(kind, self.span, self.line, self.column)),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} {} {:?}",
            self.line,
            self.column,
            self.kind.name(),
            self.lexeme
        )?;
        if let TokenKind::Error(kind) = self.kind {
            write!(f, " ({kind})")?;
        }
        Ok(())
    }
}

/// Every kind of token in BLang.
///
/// The set is closed: keywords and operators are told apart by their lexeme,
/// not by separate variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    /// Name that is not a reserved word, e.g. `foo`, `_tmp1`.
    Identifier,
    /// Decimal literal, `42` or `3.14`.
    Number,
    /// Double-quoted string literal.
    String,
    /// Operator or punctuation, resolved by longest match.
    Operator,
    /// Reserved word from [`KEYWORDS`].
    Keyword,
    /// `// ...` or `/* ... */`. Preserved for tooling.
    Comment,
    /// End of input. Always the last token, and the only one of its kind.
    EndOfInput,
    /// Malformed input. Used for error recovery.
    Error(LexErrorKind),
}

impl TokenKind {
    /// Variant name without payload, e.g. `"Identifier"` or `"Error"`.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identifier => "Identifier",
            Self::Number => "Number",
            Self::String => "String",
            Self::Operator => "Operator",
            Self::Keyword => "Keyword",
            Self::Comment => "Comment",
            Self::EndOfInput => "EndOfInput",
            Self::Error(_) => "Error",
        }
    }
}

// ── Keyword table ────────────────────────────────────────────────────────

/// Reserved words of BLang.
pub const KEYWORDS: &[&str] = &[
    "and", "break", "class", "const", "continue", "else", "extends", "false", "for", "fun",
    "if", "import", "in", "interface", "let", "new", "nil", "not", "or", "private", "public",
    "return", "static", "super", "this", "true", "var", "while",
];

fn keyword_set() -> &'static FxHashSet<&'static str> {
    static SET: OnceLock<FxHashSet<&'static str>> = OnceLock::new();
    SET.get_or_init(|| KEYWORDS.iter().copied().collect())
}

/// Whether `text` is exactly a reserved word.
///
/// The lexer calls this after scanning a whole identifier-shaped run, so a
/// prefix such as `class` in `classify` never matches.
pub fn is_keyword(text: &str) -> bool {
    keyword_set().contains(text)
}

// ── Operator table ───────────────────────────────────────────────────────

/// Operator and punctuation lexemes, longest first.
///
/// Lexemes sharing a leading character keep this relative order in the
/// lookup table, which is what makes [`longest_operator`] a maximal munch.
pub const OPERATORS: &[&str] = &[
    // 3 characters
    "...", "<<=", ">>=",
    // 2 characters
    "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
    "^=", "->", "=>", "::", "<<", ">>", "..", "**",
    // 1 character
    "+", "-", "*", "/", "%", "=", "!", "<", ">", "&", "|", "^", "~", "?", ":", ".", ",", ";",
    "(", ")", "[", "]", "{", "}",
];

/// Operators grouped by leading character, each group longest first.
fn operator_table() -> &'static FxHashMap<char, Vec<&'static str>> {
    static TABLE: OnceLock<FxHashMap<char, Vec<&'static str>>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut table: FxHashMap<char, Vec<&'static str>> = FxHashMap::default();
        for &op in OPERATORS {
            if let Some(first) = op.chars().next() {
                table.entry(first).or_default().push(op);
            }
        }
        table
    })
}

/// Whether `c` can start an operator.
pub fn is_operator_start(c: char) -> bool {
    operator_table().contains_key(&c)
}

/// The longest operator that `text` starts with.
pub fn longest_operator(text: &str) -> Option<&'static str> {
    let first = text.chars().next()?;
    operator_table()
        .get(&first)?
        .iter()
        .copied()
        .find(|op| text.starts_with(*op))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_keyword_is_recognized() {
        for kw in KEYWORDS {
            assert!(is_keyword(kw), "{kw:?} should be a keyword");
        }
        assert_eq!(keyword_set().len(), KEYWORDS.len(), "duplicate keyword");
    }

    #[test]
    fn keywords_are_exact_and_case_sensitive() {
        assert!(!is_keyword("classify"));
        assert!(!is_keyword("clas"));
        assert!(!is_keyword(""));
        assert!(!is_keyword("Class"));
        assert!(!is_keyword("TRUE"));
    }

    #[test]
    fn operators_are_ordered_longest_first() {
        let lens: Vec<usize> = OPERATORS.iter().map(|op| op.len()).collect();
        assert!(lens.windows(2).all(|w| w[0] >= w[1]), "{lens:?}");
    }

    #[test]
    fn longest_operator_prefers_longer_lexemes() {
        assert_eq!(longest_operator("==b"), Some("=="));
        assert_eq!(longest_operator("=b"), Some("="));
        assert_eq!(longest_operator("&&&"), Some("&&"));
        assert_eq!(longest_operator("<<=1"), Some("<<="));
        assert_eq!(longest_operator("...."), Some("..."));
        assert_eq!(longest_operator("->x"), Some("->"));
    }

    #[test]
    fn longest_operator_rejects_non_operators() {
        assert_eq!(longest_operator(""), None);
        assert_eq!(longest_operator("abc"), None);
        assert_eq!(longest_operator("$"), None);
        assert!(!is_operator_start('@'));
        assert!(is_operator_start('{'));
    }

    #[test]
    fn token_error_exposes_lex_error() {
        let tok = Token::new(
            TokenKind::Error(LexErrorKind::UnterminatedString),
            "\"abc",
            1,
            1,
            Span::new(0, 4),
        );
        assert!(tok.is_error());
        let err = tok.error().unwrap();
        assert_eq!(err.kind, LexErrorKind::UnterminatedString);
        assert_eq!(err.span, Span::new(0, 4));

        let ok = Token::new(TokenKind::Identifier, "x", 1, 1, Span::new(0, 1));
        assert!(ok.error().is_none());
    }

    #[test]
    fn token_display() {
        let tok = Token::new(TokenKind::Keyword, "class", 2, 5, Span::new(10, 15));
        assert_eq!(tok.to_string(), "2:5 Keyword \"class\"");

        let err = Token::new(
            TokenKind::Error(LexErrorKind::UnexpectedCharacter('$')),
            "$",
            1,
            1,
            Span::new(0, 1),
        );
        assert_eq!(err.to_string(), "1:1 Error \"$\" (unexpected character '$')");
    }
}
