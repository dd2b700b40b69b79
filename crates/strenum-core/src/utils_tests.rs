use std::borrow::Cow;

use crate::utils::{char_width, escape_invalid_utf8, go_quote, padding, to_title};

#[test]
fn title_capitalizes_first_letter() {
    assert_eq!(to_title("test"), "Test");
    assert_eq!(to_title("t"), "T");
    assert_eq!(to_title(""), "");
}

#[test]
fn title_keeps_identifier_tail() {
    assert_eq!(to_title("myType"), "MyType");
    assert_eq!(to_title("my_type"), "My_type");
    assert_eq!(to_title("type2"), "Type2");
}

#[test]
fn title_is_idempotent() {
    assert_eq!(to_title("Test2"), "Test2");
    assert_eq!(to_title(&to_title("status")), "Status");
}

#[test]
fn title_handles_non_ascii() {
    assert_eq!(to_title("åke"), "Åke");
    assert_eq!(to_title("ölType"), "ÖlType");
}

#[test]
fn title_capitalizes_every_word() {
    assert_eq!(to_title("hello world"), "Hello World");
}

#[test]
fn width_counts_chars() {
    assert_eq!(char_width("Test"), 4);
    assert_eq!(char_width("TestÅ"), 5);
    assert_eq!("TestÅ".len(), 6);
}

#[test]
fn padding_uses_char_width() {
    assert_eq!(padding("TestTest", 8), "");
    assert_eq!(padding("TestÅ", 8), "   ");
    assert_eq!(padding("TooLongName", 4), "");
}

#[test]
fn escape_borrows_valid_utf8() {
    assert!(matches!(escape_invalid_utf8("ö".as_bytes()), Cow::Borrowed("ö")));
}

#[test]
fn escape_keeps_distinct_bytes_distinct() {
    assert_eq!(escape_invalid_utf8(b"\xff"), "\\xff");
    assert_eq!(escape_invalid_utf8(b"\xfe"), "\\xfe");
    assert_eq!(escape_invalid_utf8("\u{FFFD}".as_bytes()), "\u{FFFD}");
    assert_eq!(escape_invalid_utf8(b"a\xc3"), "a\\xc3");
}

#[test]
fn go_quote_escapes() {
    assert_eq!(go_quote(b"test"), r#""test""#);
    assert_eq!(go_quote("ö".as_bytes()), r#""ö""#);
    assert_eq!(go_quote(b"a\\b\n"), r#""a\\b\n""#);
    assert_eq!(go_quote(b"\x00\x7f"), r#""\x00\x7f""#);
    assert_eq!(go_quote(b"\xc3\x28"), r#""\xc3(""#);
}
