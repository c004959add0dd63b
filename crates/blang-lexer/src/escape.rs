//! Escape processing for string literal lexemes.

/// The value of an escape pair `\c`, or `None` if `c` is not a valid escape.
pub(crate) fn escape_value(c: char) -> Option<char> {
    match c {
        '"' => Some('"'),
        '\\' => Some('\\'),
        'n' => Some('\n'),
        't' => Some('\t'),
        _ => None,
    }
}

/// Turn the raw lexeme of a `String` token into the string it denotes.
///
/// Returns `None` if `raw` contains an invalid escape or a dangling
/// backslash. The lexer never produces a `String` token for which this fails.
pub fn unescape(raw: &str) -> Option<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(escape_value(chars.next()?)?);
        } else {
            out.push(c);
        }
    }
    Some(out)
}
