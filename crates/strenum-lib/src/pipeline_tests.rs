use std::path::PathBuf;

use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::{Error, GenerateConfig, Generated, Generator, Result, SourceMap, generate};

fn testdata(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../testdata")
        .join(name)
}

fn run(src: &str, config: &GenerateConfig) -> Result<Generated> {
    let mut sources = SourceMap::new();
    sources.add_file("enum.go", src);
    Ok(Generator::new(sources, config)
        .resolve()?
        .extract()?
        .validate()?
        .emit())
}

#[test]
fn vanilla_package() {
    let config = GenerateConfig::new()
        .paths([testdata("vanilla.go")])
        .type_names(["Test"]);

    let generated = generate(&config).unwrap();

    assert_eq!(generated.header(), "package main\n");
    assert!(generated.body().contains("\tTestTest:  struct{}{},\n"));
    assert!(generated.body().contains("\tTestTest2: struct{}{},\n"));
    assert!(!generated.body().contains("UnmarshalText"));
    assert!(generated.warnings().is_empty());
}

#[test]
fn text_unmarshaling_imports_fmt() {
    let config = GenerateConfig::new()
        .paths([testdata("unicode.go")])
        .type_names(["Test"])
        .text_unmarshaling(true);

    let generated = generate(&config).unwrap();

    assert_eq!(
        generated.header(),
        "package main\n\nimport (\n\t\"fmt\"\n)\n"
    );
    assert!(generated.body().contains("\tTestÅ:    struct{}{},\n"));
    assert!(
        generated
            .body()
            .contains("func (v *Test) UnmarshalText(text []byte) error {\n")
    );
}

#[test]
fn repeated_runs_are_identical() {
    let config = GenerateConfig::new()
        .paths([testdata("multiple.go")])
        .type_names(["Test2", "Test"])
        .text_unmarshaling(true);

    let first = generate(&config).unwrap().to_source();
    for _ in 0..20 {
        assert_eq!(generate(&config).unwrap().to_source(), first);
    }

    let test = first.find("func TestValues").unwrap();
    let test2 = first.find("func Test2Values").unwrap();
    assert!(test < test2);
}

#[test]
fn directory_with_shared_block() {
    let config = GenerateConfig::new()
        .paths([testdata("mixed")])
        .type_names(["MyType", "YourType"]);

    let generated = generate(&config).unwrap();

    assert_eq!(generated.header(), "package test\n");
    assert!(generated.body().contains(
        "\treturn []MyType{\n\t\tMyTypeTest,\n\t\tMyTypeTest2,\n\t\tMyTypeTest3,\n\t}\n"
    ));
    assert!(
        generated
            .body()
            .contains("\treturn []YourType{\n\t\tYourTypeTest1,\n\t\tYourTypeTest2,\n\t}\n")
    );
}

#[test]
fn duplicate_value_fails_validation() {
    let src = indoc! {r#"
        package main

        type Test2 string

        const (
        	Test2Test  Test2 = "test"
        	Test2Test2 Test2 = "test3"
        	Test2Test3 Test2 = "test3"
        )
    "#};
    let config = GenerateConfig::new().type_names(["Test2"]);

    let err = run(src, &config).unwrap_err();

    let Error::Validation(diagnostics) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(diagnostics.len(), 1);
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.kind(), DiagnosticKind::DuplicateValue);
    assert_eq!(diag.message(), "the type Test2 has multiple values of test3");
    assert_eq!(err.to_string(), "value validation failed with 1 errors");
}

#[test]
fn unresolved_constant_fails_extraction() {
    let src = indoc! {r#"
        package main

        type Test string

        const TestA Test = missing
    "#};
    let config = GenerateConfig::new().type_names(["Test"]);

    let err = run(src, &config).unwrap_err();

    let diagnostics = err.diagnostics().unwrap();
    assert!(matches!(err, Error::Extraction(_)));
    assert_eq!(
        diagnostics.iter().next().unwrap().kind(),
        DiagnosticKind::UnresolvedConstant
    );
}

#[test]
fn every_failing_block_is_reported() {
    let src = indoc! {r#"
        package main

        type Test string

        type Level int

        const TestA Test = missing

        const LevelLow Level = 1
    "#};
    let config = GenerateConfig::new().type_names(["Test", "Level"]);
    let mut sources = SourceMap::new();
    sources.add_file("enum.go", src);

    let result = Generator::new(sources, &config).resolve().unwrap().extract();

    let Err(Error::Extraction(diagnostics)) = result else {
        panic!("expected extraction error");
    };
    assert_eq!(diagnostics.error_count(), 2);
    let kinds: Vec<_> = diagnostics
        .iter()
        .filter(|d| d.is_error())
        .map(|d| d.kind())
        .collect();
    assert_eq!(
        kinds,
        [
            DiagnosticKind::UnresolvedConstant,
            DiagnosticKind::NonTextualConstant
        ]
    );
}

#[test]
fn distinct_byte_escapes_are_not_duplicates() {
    let src = indoc! {r#"
        package main

        type Test string

        const (
        	TestFF          Test = "\xff"
        	TestFE          Test = "\xfe"
        	TestReplacement Test = "\uFFFD"
        )
    "#};
    let config = GenerateConfig::new().type_names(["Test"]);

    let generated = run(src, &config).unwrap();

    assert!(generated.body().contains("\tTestFF:          struct{}{},\n"));
    assert!(generated.body().contains("\tTestReplacement: struct{}{},\n"));
}

#[test]
fn repeated_byte_escape_is_a_duplicate() {
    let src = indoc! {r#"
        package main

        type Test string

        const (
        	TestA Test = "\xff"
        	TestB Test = "\377"
        )
    "#};
    let config = GenerateConfig::new().type_names(["Test"]);

    let err = run(src, &config).unwrap_err();

    let Error::Validation(diagnostics) = &err else {
        panic!("expected validation error, got {err:?}");
    };
    let diag = diagnostics.iter().next().unwrap();
    assert_eq!(diag.message(), r"the type Test has multiple values of \xff");
}

#[test]
fn no_targets_yields_header_only() {
    let src = indoc! {r#"
        package main

        type Test string

        const TestA Test = "a"
    "#};

    let generated = run(src, &GenerateConfig::new()).unwrap();

    assert_eq!(generated.to_source(), "package main\n");
}

#[test]
fn missing_target_is_a_warning() {
    let src = indoc! {r#"
        package main

        type Test string

        const TestA Test = "a"
    "#};
    let config = GenerateConfig::new().type_names(["Other"]);

    let generated = run(src, &config).unwrap();

    assert_eq!(generated.body(), "");
    assert_eq!(generated.warnings().warning_count(), 1);
    assert_eq!(
        generated.warnings().iter().next().unwrap().kind(),
        DiagnosticKind::MissingTargetType
    );
}

#[test]
fn two_packages_are_rejected() {
    let mut sources = SourceMap::new();
    sources.add_file("a.go", "package a\n");
    sources.add_file("b.go", "package b\n");

    let result = Generator::new(sources, &GenerateConfig::new()).resolve();

    match result {
        Err(Error::ModuleResolution { found, names }) => {
            assert_eq!(found, 2);
            assert_eq!(names, ["a", "b"]);
        }
        Err(other) => panic!("expected module resolution error, got {other:?}"),
        Ok(_) => panic!("expected module resolution error"),
    }
}

#[test]
fn syntax_error_stops_before_extraction() {
    let src = "package main\n\nconst (\n";

    let err = run(src, &GenerateConfig::new()).unwrap_err();

    assert!(matches!(err, Error::Parse(_)));
}

#[test]
fn write_to_matches_to_source() {
    let src = indoc! {r#"
        package main

        type Test string

        const TestA Test = "a"
    "#};
    let config = GenerateConfig::new()
        .type_names(["Test"])
        .text_unmarshaling(true);
    let generated = run(src, &config).unwrap();

    let mut out = Vec::new();
    generated.write_to(&mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), generated.to_source());
}

#[test]
fn missing_path_is_io_error() {
    let config = GenerateConfig::new().paths([testdata("does-not-exist.go")]);

    let err = Generator::load(&config).err().unwrap();

    assert!(matches!(err, Error::Io { .. }));
}
