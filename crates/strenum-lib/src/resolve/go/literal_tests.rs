use super::literal;

#[test]
fn plain_string() {
    assert_eq!(literal::interpreted_string(r#""hello""#).unwrap(), b"hello");
    assert_eq!(literal::interpreted_string(r#""""#).unwrap(), b"");
}

#[test]
fn string_escapes() {
    assert_eq!(
        literal::interpreted_string(r#""a\tb\n\"c\"\\""#).unwrap(),
        b"a\tb\n\"c\"\\"
    );
    assert_eq!(
        literal::interpreted_string(r#""ö\U0001F600""#).unwrap(),
        "ö😀".as_bytes()
    );
    assert_eq!(literal::interpreted_string(r#""\x41\102""#).unwrap(), b"AB");
}

#[test]
fn utf8_passes_through() {
    assert_eq!(literal::interpreted_string(r#""ö""#).unwrap(), "ö".as_bytes());
}

#[test]
fn byte_escapes_form_utf8() {
    assert_eq!(
        literal::interpreted_string(r#""\xc3\xb6""#).unwrap(),
        "ö".as_bytes()
    );
}

#[test]
fn invalid_byte_escapes_stay_distinct() {
    let ff = literal::interpreted_string(r#""\xff""#).unwrap();
    let fe = literal::interpreted_string(r#""\xfe""#).unwrap();
    let replacement = literal::interpreted_string(r#""\uFFFD""#).unwrap();

    assert_eq!(ff, [0xff_u8]);
    assert_eq!(fe, [0xfe_u8]);
    assert_eq!(literal::interpreted_string(r#""\377""#).unwrap(), ff);
    assert_ne!(ff, fe);
    assert_ne!(ff, replacement);
}

#[test]
fn bad_escapes() {
    assert!(literal::interpreted_string(r#""\q""#).is_err());
    assert!(literal::interpreted_string(r#""\u12""#).is_err());
    assert!(literal::interpreted_string(r#""\400""#).is_err());
    assert!(literal::interpreted_string(r#""\uD800""#).is_err());
}

#[test]
fn raw_strings() {
    assert_eq!(literal::raw_string("`a\\nb`").unwrap(), b"a\\nb");
    assert_eq!(literal::raw_string("`a\r\nb`").unwrap(), b"a\nb");
}

#[test]
fn runes() {
    assert_eq!(literal::rune("'a'").unwrap(), 97);
    assert_eq!(literal::rune("'ö'").unwrap(), 0xf6);
    assert_eq!(literal::rune(r"'\n'").unwrap(), 10);
    assert_eq!(literal::rune(r"'\''").unwrap(), 39);
    assert_eq!(literal::rune(r"'\xff'").unwrap(), 255);
    assert!(literal::rune("'ab'").is_err());
    assert!(literal::rune("''").is_err());
}

#[test]
fn integers() {
    assert_eq!(literal::int("42").unwrap(), 42);
    assert_eq!(literal::int("0").unwrap(), 0);
    assert_eq!(literal::int("0x1F").unwrap(), 31);
    assert_eq!(literal::int("0o17").unwrap(), 15);
    assert_eq!(literal::int("017").unwrap(), 15);
    assert_eq!(literal::int("0b101").unwrap(), 5);
    assert_eq!(literal::int("1_000_000").unwrap(), 1_000_000);
    assert!(literal::int("09").is_err());
}

#[test]
fn floats() {
    assert_eq!(literal::float("1.5").unwrap(), 1.5);
    assert_eq!(literal::float("1e3").unwrap(), 1000.0);
    assert_eq!(literal::float(".5").unwrap(), 0.5);
    assert!(literal::float("0x1p-2").is_err());
}
