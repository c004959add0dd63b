//! Property tests over arbitrary and language-shaped input.

use blang_common::span::LineIndex;
use blang_common::token::TokenKind;
use blang_lexer::{tokenize, tokenize_with, LexerOptions};
use proptest::prelude::*;

/// Source text drawn mostly from characters that start or end tokens.
const SOURCE_LIKE: &str = r#"[a-z0-9_ \t\n."/*=&|<>!$\\-]{0,80}"#;

fn check_invariants(source: &str) -> Result<(), TestCaseError> {
    let tokens = tokenize(source);

    // Exactly one EndOfInput, and it is last.
    prop_assert!(!tokens.is_empty());
    let eoi = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::EndOfInput)
        .count();
    prop_assert_eq!(eoi, 1);
    prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EndOfInput));

    // Positions never go backwards and agree with an independent line index.
    let index = LineIndex::new(source);
    for pair in tokens.windows(2) {
        prop_assert!(pair[0].span.end <= pair[1].span.start, "{:?}", pair);
        prop_assert!((pair[0].line, pair[0].column) <= (pair[1].line, pair[1].column));
    }
    for tok in &tokens {
        prop_assert_eq!(index.line_col(tok.span.start), (tok.line, tok.column), "{}", tok);
        let text = &source[tok.span.range()];
        match tok.kind {
            TokenKind::String => prop_assert_eq!(text, format!("\"{}\"", tok.lexeme)),
            _ => prop_assert_eq!(text, tok.lexeme.as_str()),
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_for_any_text(source in any::<String>()) {
        check_invariants(&source)?;
    }

    #[test]
    fn invariants_hold_for_source_like_text(source in SOURCE_LIKE) {
        check_invariants(&source)?;
    }

    #[test]
    fn tokenize_is_deterministic(source in SOURCE_LIKE) {
        prop_assert_eq!(tokenize(&source), tokenize(&source));
    }

    #[test]
    fn filtering_comments_only_drops_comment_tokens(source in SOURCE_LIKE) {
        let all: Vec<_> = tokenize(&source)
            .into_iter()
            .filter(|t| t.kind != TokenKind::Comment)
            .collect();
        let filtered = tokenize_with(&source, LexerOptions { emit_comments: false });
        prop_assert_eq!(all, filtered);
    }
}
