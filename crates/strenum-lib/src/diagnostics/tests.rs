use strenum_core::{SourceId, Span};

use super::*;
use crate::SourceMap;

fn span(start: usize, end: usize) -> Span {
    Span::from_bytes(SourceId::from_raw(0), start..end)
}

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn default_severities() {
    assert_eq!(DiagnosticKind::SyntaxError.default_severity(), Severity::Error);
    assert_eq!(DiagnosticKind::DuplicateValue.default_severity(), Severity::Error);
    assert_eq!(
        DiagnosticKind::MissingTargetType.default_severity(),
        Severity::Warning
    );
}

#[test]
fn message_templates() {
    let kind = DiagnosticKind::UnresolvedConstant;
    assert_eq!(kind.message(None), "no value for constant");
    assert_eq!(kind.message(Some("StatusA")), "no value for constant StatusA");

    let kind = DiagnosticKind::SyntaxError;
    assert_eq!(kind.message(Some("unexpected `}`")), "syntax error: unexpected `}`");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedConstant, span(0, 5))
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), "no value for constant");
}

#[test]
fn report_with_context() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::NonTextualConstant, span(6, 11))
        .message("Level")
        .type_name("Level")
        .identifier("Low")
        .emit();

    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::NonTextualConstant);
    assert_eq!(diag.message(), "can't handle non-string constant type Level");
    assert_eq!(diag.type_name(), Some("Level"));
    assert_eq!(diag.identifier(), Some("Low"));
    assert_eq!(diag.value(), None);
}

#[test]
fn counts_by_severity() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report_global(DiagnosticKind::MissingTargetType)
        .message("Color")
        .emit();
    diagnostics
        .report(DiagnosticKind::DuplicateValue, span(0, 1))
        .emit();

    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 1);
    assert!(diagnostics.has_warnings());
}

#[test]
fn warnings_only_is_not_error() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report_global(DiagnosticKind::MissingTargetType)
        .emit();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
}

#[test]
fn extend_merges() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::SyntaxError, span(0, 1)).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::SyntaxError, span(1, 2)).emit();

    a.extend(b);

    assert_eq!(a.len(), 2);
}

#[test]
fn plain_display() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateValue, span(30, 37))
        .message("the type Test2 has multiple values of test3")
        .related_to("first defined here", span(10, 17))
        .emit();

    let diag = diagnostics.iter().next().unwrap();
    insta::assert_snapshot!(
        diag.to_string(),
        @"error at 30..37: the type Test2 has multiple values of test3 (related: first defined here at 10..17)"
    );
}

#[test]
fn rendered_printer_shows_source() {
    let mut sources = SourceMap::new();
    sources.add_file("enum.go", "package p\n\nconst A T = B\n");
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnresolvedConstant, span(17, 18))
        .message("A")
        .emit();

    let out = diagnostics.render(&sources);

    assert!(out.starts_with("error: no value for constant A"));
    assert!(out.contains("enum.go:3:7"));
    assert!(out.contains("const A T = B"));
}

#[test]
fn rendered_printer_global_warning() {
    let sources = SourceMap::new();
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report_global(DiagnosticKind::MissingTargetType)
        .message("Color")
        .emit();

    let out = diagnostics.render(&sources);

    assert_eq!(out, "warning: no constants found for target type Color\n");
}
