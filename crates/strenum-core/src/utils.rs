use std::borrow::Cow;
use std::fmt::Write as _;

/// Upper-case the first letter of every word.
///
/// Letters, digits and `_` form words, so for an identifier only the first
/// character changes. Non-ASCII letters are upper-cased too.
///
/// # Examples
/// ```
/// use strenum_core::utils::to_title;
/// assert_eq!(to_title("status"), "Status");
/// assert_eq!(to_title("my_type"), "My_type");
/// assert_eq!(to_title("Already"), "Already");
/// ```
pub fn to_title(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && c.is_alphabetic() {
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
        at_word_start = !(c.is_alphanumeric() || c == '_');
    }
    result
}

/// Width of `s` in characters, not bytes.
///
/// # Examples
/// ```
/// use strenum_core::utils::char_width;
/// assert_eq!(char_width("TestÅ"), 5);
/// ```
pub fn char_width(s: &str) -> usize {
    s.chars().count()
}

/// Spaces needed after `s` to reach `width` characters.
pub fn padding(s: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(char_width(s)))
}

/// `bytes` as text, with every byte that is not part of valid UTF-8
/// written as `\xhh`. Borrows when `bytes` is valid UTF-8.
pub fn escape_invalid_utf8(bytes: &[u8]) -> Cow<'_, str> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(bytes.len() + 8);
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        for byte in chunk.invalid() {
            let _ = write!(out, "\\x{byte:02x}");
        }
    }
    Cow::Owned(out)
}

/// Quote `bytes` as a Go interpreted string literal.
///
/// # Examples
/// ```
/// use strenum_core::utils::go_quote;
/// assert_eq!(go_quote(b"a\"b"), r#""a\"b""#);
/// assert_eq!(go_quote(b"\xff"), r#""\xff""#);
/// ```
pub fn go_quote(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() + 2);
    out.push('"');
    for chunk in bytes.utf8_chunks() {
        for c in chunk.valid().chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if c.is_control() && (c as u32) < 0x80 => {
                    let _ = write!(out, "\\x{:02x}", c as u32);
                }
                c if c.is_control() => {
                    let _ = write!(out, "\\u{:04x}", c as u32);
                }
                c => out.push(c),
            }
        }
        for byte in chunk.invalid() {
            let _ = write!(out, "\\x{byte:02x}");
        }
    }
    out.push('"');
    out
}
