//! Escaping for double-quoted PromQL strings.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EscapeError {
    #[error("string ends inside an escape sequence")]
    TrailingBackslash,
    #[error("unknown escape sequence: \\{0}")]
    UnknownEscape(char),
    #[error("unescaped double quote at byte {0}")]
    UnescapedQuote(usize),
    #[error("malformed escape sequence: \\{0}")]
    Malformed(String),
    #[error("invalid code point U+{0:X}")]
    InvalidCodePoint(u32),
    #[error("escaped bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Escapes `s` so that it can sit between double quotes in a query.
///
/// ```
/// use promql_fmt::escape::escape_string;
///
/// assert_eq!(escape_string(r#"a"b\c"#), r#"a\"b\\c"#);
/// assert_eq!(escape_string("line\nbreak"), r"line\nbreak");
/// ```
pub fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0b}' => out.push_str("\\v"),
            '\u{0c}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// Reverses escaping: the body of a double-quoted string literal, without
/// its surrounding quotes.
pub fn unescape_string(s: &str) -> Result<String, EscapeError> {
    let mut bytes: Vec<u8> = Vec::with_capacity(s.len());
    let mut chars = s.char_indices();

    while let Some((pos, c)) = chars.next() {
        match c {
            '"' => return Err(EscapeError::UnescapedQuote(pos)),
            '\\' => {}
            c => {
                push_char(&mut bytes, c);
                continue;
            }
        }

        let (_, esc) = chars.next().ok_or(EscapeError::TrailingBackslash)?;
        match esc {
            'a' => bytes.push(0x07),
            'b' => bytes.push(0x08),
            'f' => bytes.push(0x0c),
            'n' => bytes.push(b'\n'),
            'r' => bytes.push(b'\r'),
            't' => bytes.push(b'\t'),
            'v' => bytes.push(0x0b),
            '\\' | '"' | '\'' => push_char(&mut bytes, esc),
            'x' => {
                let value = take_digits(&mut chars, esc, 2, 16)?;
                bytes.push(value as u8);
            }
            'u' | 'U' => {
                let width = if esc == 'u' { 4 } else { 8 };
                let value = take_digits(&mut chars, esc, width, 16)?;
                let c = char::from_u32(value).ok_or(EscapeError::InvalidCodePoint(value))?;
                push_char(&mut bytes, c);
            }
            '0'..='7' => {
                let rest = take_digits(&mut chars, esc, 2, 8)?;
                let value = esc.to_digit(8).unwrap_or(0) * 64 + rest;
                if value > 0xff {
                    return Err(EscapeError::Malformed(format!("{esc}")));
                }
                bytes.push(value as u8);
            }
            other => return Err(EscapeError::UnknownEscape(other)),
        }
    }

    String::from_utf8(bytes).map_err(|_| EscapeError::InvalidUtf8)
}

fn push_char(bytes: &mut Vec<u8>, c: char) {
    let mut buf = [0u8; 4];
    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
}

fn take_digits(
    chars: &mut std::str::CharIndices<'_>,
    esc: char,
    count: usize,
    radix: u32,
) -> Result<u32, EscapeError> {
    let mut seen = String::new();
    let mut value: u32 = 0;
    for _ in 0..count {
        let (_, c) = chars
            .next()
            .ok_or_else(|| EscapeError::Malformed(format!("{esc}{seen}")))?;
        seen.push(c);
        let digit = c
            .to_digit(radix)
            .ok_or_else(|| EscapeError::Malformed(format!("{esc}{seen}")))?;
        value = value * radix + digit;
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_control_characters() {
        assert_eq!(escape_string("\u{07}\u{0b}\u{01}"), "\\a\\v\\u0001");
        assert_eq!(escape_string("\u{7f}"), "\\u007f");
    }

    #[test]
    fn leaves_unicode_alone() {
        assert_eq!(escape_string("héllo ✓"), "héllo ✓");
    }

    #[test]
    fn unescapes_numeric_forms() {
        assert_eq!(unescape_string(r"\x41\101é\U0001F600").unwrap(), "AAé😀");
        assert_eq!(unescape_string(r"\'").unwrap(), "'");
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(unescape_string("abc\\"), Err(EscapeError::TrailingBackslash));
        assert_eq!(unescape_string(r"\q"), Err(EscapeError::UnknownEscape('q')));
        assert_eq!(unescape_string(r#"a"b"#), Err(EscapeError::UnescapedQuote(1)));
        assert!(matches!(unescape_string(r"\x4"), Err(EscapeError::Malformed(_))));
        assert_eq!(unescape_string(r"\ud800"), Err(EscapeError::InvalidCodePoint(0xd800)));
        assert_eq!(unescape_string(r"\xff"), Err(EscapeError::InvalidUtf8));
    }
}
