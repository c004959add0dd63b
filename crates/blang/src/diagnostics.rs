//! Ariadne-based rendering for lexical errors.
//!
//! Every `Error` token in a scan becomes one report: a code, the error
//! message, and a label under the offending text.

use std::ops::Range;

use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use blang_common::error::{LexError, LexErrorKind};

/// How diagnostics are written.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticOptions {
    pub color: bool,
    /// One JSON object per line instead of a rendered report.
    pub json: bool,
}

impl DiagnosticOptions {
    /// Plain rendered reports, suitable for tests and pipes.
    pub fn colorless() -> Self {
        Self {
            color: false,
            json: false,
        }
    }
}

/// Assign a stable code to each lexical error kind.
fn error_code(kind: &LexErrorKind) -> &'static str {
    match kind {
        LexErrorKind::UnexpectedCharacter(_) => "L0001",
        LexErrorKind::UnterminatedString => "L0002",
        LexErrorKind::UnterminatedBlockComment => "L0003",
        LexErrorKind::InvalidEscapeSequence(_) => "L0004",
        LexErrorKind::MalformedNumber => "L0005",
        LexErrorKind::SourceTooLarge => "L0006",
    }
}

fn label_message(kind: &LexErrorKind) -> &'static str {
    match kind {
        LexErrorKind::UnexpectedCharacter(_) => "not part of any token",
        LexErrorKind::UnterminatedString => "string starts here and is never closed",
        LexErrorKind::UnterminatedBlockComment => "comment starts here and runs to end of file",
        LexErrorKind::InvalidEscapeSequence(_) => "valid escapes are \\\" \\\\ \\n \\t",
        LexErrorKind::MalformedNumber => "numbers cannot run into letters",
        LexErrorKind::SourceTooLarge => "split the script into smaller files",
    }
}

/// Render one lexical error.
///
/// With `opts.json` the result is a single JSON line; otherwise it is an
/// ariadne report over `source`.
pub fn render_lex_error(
    error: &LexError,
    source: &str,
    file_name: &str,
    opts: &DiagnosticOptions,
) -> String {
    let code = error_code(&error.kind);
    let range = clamp(error.span.range(), source);

    if opts.json {
        let diag = serde_json::json!({
            "code": code,
            "severity": "error",
            "message": error.kind.to_string(),
            "file": file_name,
            "line": error.line,
            "column": error.column,
            "spans": [{
                "start": range.start,
                "end": range.end,
                "label": label_message(&error.kind),
            }],
        });
        return format!("{diag}\n");
    }

    let config = Config::default()
        .with_color(opts.color)
        .with_index_type(IndexType::Byte);
    let report = Report::build(ReportKind::Error, (file_name, range.clone()))
        .with_code(code)
        .with_message(error.kind.to_string())
        .with_config(config)
        .with_label(
            Label::new((file_name, range))
                .with_message(label_message(&error.kind))
                .with_color(Color::Red),
        )
        .finish();

    let mut buf = Vec::new();
    if let Err(e) = report.write((file_name, Source::from(source)), &mut buf) {
        return format!("{file_name}:{}: error[{code}]: {} ({e})\n", error.line, error.kind);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Clamp a byte range into `source`, widening empty ranges to one byte where
/// possible so the label has something to point at.
fn clamp(range: Range<usize>, source: &str) -> Range<usize> {
    let len = source.len();
    let start = range.start.min(len);
    let end = range.end.min(len).max(start);
    if start == end {
        start..(end + 1).min(len)
    } else {
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blang_lexer::{errors, tokenize};

    fn first_error(source: &str) -> LexError {
        errors(&tokenize(source))
            .into_iter()
            .next()
            .expect("expected a lexical error")
    }

    #[test]
    fn report_names_code_and_message() {
        let source = "let x = $;";
        let out = render_lex_error(
            &first_error(source),
            source,
            "test.bl",
            &DiagnosticOptions::colorless(),
        );
        assert!(out.contains("L0001"), "{out}");
        assert!(out.contains("unexpected character '$'"), "{out}");
        assert!(out.contains("test.bl"), "{out}");
    }

    #[test]
    fn json_diagnostic_has_position() {
        let source = "x\n  \"open";
        let opts = DiagnosticOptions {
            color: false,
            json: true,
        };
        let out = render_lex_error(&first_error(source), source, "test.bl", &opts);
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["code"], "L0002");
        assert_eq!(value["message"], "unterminated string literal");
        assert_eq!(value["line"], 2);
        assert_eq!(value["column"], 3);
        assert_eq!(value["spans"][0]["start"], 4);
        assert_eq!(value["spans"][0]["end"], 9);
    }

    #[test]
    fn clamp_widens_empty_ranges() {
        assert_eq!(clamp(2..2, "abcd"), 2..3);
        assert_eq!(clamp(4..4, "abcd"), 4..4);
        assert_eq!(clamp(1..10, "abcd"), 1..4);
    }
}
