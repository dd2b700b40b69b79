use std::path::PathBuf;

use strenum_lib::{Generator, SourceMap};

use super::generate::{GenerateArgs, write_output};

fn args(text: bool) -> GenerateArgs {
    GenerateArgs {
        paths: vec![PathBuf::from("enum.go")],
        type_names: vec!["Status".to_owned()],
        text,
        output: None,
        color: false,
    }
}

#[test]
fn config_carries_flags() {
    let config = args(true).config();

    assert_eq!(config.get_paths(), [PathBuf::from("enum.go")]);
    assert!(config.get_type_names().contains("Status"));
    assert!(config.get_text_unmarshaling());
}

#[test]
fn writes_generated_code_to_file() {
    let mut sources = SourceMap::new();
    sources.add_file(
        "enum.go",
        "package status\n\ntype Status string\n\nconst StatusOn Status = \"on\"\n",
    );
    let generated = Generator::new(sources, &args(false).config())
        .resolve()
        .unwrap()
        .extract()
        .unwrap()
        .validate()
        .unwrap()
        .emit();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("status_gen.go");
    write_output(&generated, Some(&path)).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, generated.to_source());
    assert!(written.starts_with("package status\n"));
    assert!(written.contains("func StatusValues() []Status {\n"));
}

#[test]
fn unwritable_output_is_an_error() {
    let generated = Generator::new(SourceMap::one_liner("package p\n"), &args(false).config())
        .resolve()
        .unwrap()
        .extract()
        .unwrap()
        .validate()
        .unwrap()
        .emit();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.go");

    assert!(write_output(&generated, Some(&path)).is_err());
}
