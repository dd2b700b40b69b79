use strenum_core::{DeclaredValue, SourceId, Span, TypeValueIndex};

use crate::diagnostics::DiagnosticKind;
use crate::validate::validate;

fn value(identifier: &str, literal: &str, at: usize) -> DeclaredValue {
    DeclaredValue::new(
        identifier,
        literal,
        Span::from_bytes(SourceId::default(), at..at + identifier.len()),
    )
}

#[test]
fn unique_values_pass() {
    let mut index = TypeValueIndex::new();
    index.push("Test", value("TestA", "test", 0));
    index.push("Test", value("TestB", "hello", 10));
    index.push("Test2", value("Test2A", "test", 20));

    let diagnostics = validate(&index);

    assert!(diagnostics.is_empty());
}

#[test]
fn duplicate_names_type_and_value() {
    let mut index = TypeValueIndex::new();
    index.push("Test2", value("Test2A", "test", 0));
    index.push("Test2", value("Test2B", "test3", 10));
    index.push("Test2", value("Test2C", "test3", 20));

    let diagnostics = validate(&index);

    assert_eq!(diagnostics.len(), 1);
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::DuplicateValue);
    assert_eq!(diag.message(), "the type Test2 has multiple values of test3");
    assert_eq!(diag.type_name(), Some("Test2"));
    assert_eq!(diag.value(), Some("test3"));
    assert_eq!(diag.identifier(), Some("Test2C"));
    assert_eq!(diag.span().map(|s| u32::from(s.range.start())), Some(20));
    assert_eq!(diag.related().len(), 1);
    assert_eq!(u32::from(diag.related()[0].span().range.start()), 10);
}

#[test]
fn one_diagnostic_per_repeated_literal() {
    let mut index = TypeValueIndex::new();
    index.push("T", value("A", "x", 0));
    index.push("T", value("B", "x", 10));
    index.push("T", value("C", "x", 20));

    let diagnostics = validate(&index);

    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn every_type_is_checked_in_name_order() {
    let mut index = TypeValueIndex::new();
    index.push("Zed", value("Z1", "z", 0));
    index.push("Zed", value("Z2", "z", 10));
    index.push("Alpha", value("A1", "b", 20));
    index.push("Alpha", value("A2", "a", 30));
    index.push("Alpha", value("A3", "a", 40));
    index.push("Alpha", value("A4", "b", 50));

    let diagnostics = validate(&index);

    let found: Vec<_> = diagnostics
        .iter()
        .map(|d| (d.type_name().unwrap(), d.value().unwrap()))
        .collect();
    assert_eq!(found, [("Alpha", "a"), ("Alpha", "b"), ("Zed", "z")]);
}

#[test]
fn same_literal_in_different_types_is_fine() {
    let mut index = TypeValueIndex::new();
    index.push("A", value("A1", "same", 0));
    index.push("B", value("B1", "same", 10));

    assert!(validate(&index).is_empty());
}

#[test]
fn distinct_bytes_are_distinct_values() {
    let mut index = TypeValueIndex::new();
    index.push("T", DeclaredValue::new("A", vec![0xff], Span::default()));
    index.push("T", DeclaredValue::new("B", vec![0xfe], Span::default()));
    index.push("T", DeclaredValue::new("C", "\u{FFFD}", Span::default()));

    assert!(validate(&index).is_empty());
}

#[test]
fn duplicate_bytes_render_escaped() {
    let mut index = TypeValueIndex::new();
    index.push("T", DeclaredValue::new("A", vec![b'a', 0xff], Span::default()));
    index.push("T", DeclaredValue::new("B", vec![b'a', 0xff], Span::default()));

    let diagnostics = validate(&index);

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), r"the type T has multiple values of a\xff");
    assert_eq!(diag.value(), Some(r"a\xff"));
}
