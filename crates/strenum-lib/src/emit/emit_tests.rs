use strenum_core::{DeclaredValue, Span, TypeValueIndex};

use super::{Config, build_header, emit};

fn index(entries: &[(&str, &[&str])]) -> TypeValueIndex {
    let mut index = TypeValueIndex::new();
    for (ty, identifiers) in entries {
        for id in *identifiers {
            index.push(ty, DeclaredValue::new(*id, id.to_lowercase(), Span::default()));
        }
    }
    index
}

#[test]
fn basics_for_one_type() {
    let index = index(&[("Test", &["TestA", "TestLonger"])]);

    let ctx = emit(&index, Config::default());

    let expected = concat!(
        "\n",
        "// validTestValues contains a map of all valid Test values for easy lookup\n",
        "var validTestValues = map[Test]struct{}{\n",
        "\tTestA:      struct{}{},\n",
        "\tTestLonger: struct{}{},\n",
        "}\n",
        "\n",
        "// ValidTest validates if a value is a valid Test\n",
        "func (v Test) ValidTest() bool {\n",
        "\t_, ok := validTestValues[v]\n",
        "\treturn ok\n",
        "}\n",
        "\n",
        "// TestValues returns a list of all (valid) Test values\n",
        "func TestValues() []Test {\n",
        "\treturn []Test{\n",
        "\t\tTestA,\n",
        "\t\tTestLonger,\n",
        "\t}\n",
        "}\n",
    );
    assert_eq!(ctx.body(), expected);
    assert_eq!(ctx.imports().count(), 0);
}

#[test]
fn unmarshal_text_registers_fmt() {
    let index = index(&[("Test", &["TestA"])]);

    let ctx = emit(
        &index,
        Config {
            text_unmarshaling: true,
        },
    );

    let expected_tail = concat!(
        "\n",
        "// UnmarshalText takes a text, verifies that it is a correct Test and unmarshals it\n",
        "func (v *Test) UnmarshalText(text []byte) error {\n",
        "\tif valid := Test(text).ValidTest(); !valid {\n",
        "\t\treturn fmt.Errorf(\"not valid value for Test: %s\", text)\n",
        "\t}\n",
        "\t*v = Test(text)\n",
        "\treturn nil\n",
        "}\n",
    );
    assert!(ctx.body().ends_with(expected_tail));
    assert_eq!(ctx.imports().collect::<Vec<_>>(), ["\"fmt\""]);
}

#[test]
fn padding_counts_characters() {
    let index = index(&[("Test", &["TestÅ", "TestTest"])]);

    let ctx = emit(&index, Config::default());

    assert!(ctx.body().contains("\tTestÅ:    struct{}{},\n"));
    assert!(ctx.body().contains("\tTestTest: struct{}{},\n"));
}

#[test]
fn types_in_name_order_values_in_discovery_order() {
    let index = index(&[("Zeta", &["Z2", "Z1"]), ("Alpha", &["A1"])]);

    let body = emit(&index, Config::default()).body().to_owned();

    let alpha = body.find("func AlphaValues").unwrap();
    let zeta = body.find("func ZetaValues").unwrap();
    assert!(alpha < zeta);
    assert!(body.contains("\treturn []Zeta{\n\t\tZ2,\n\t\tZ1,\n\t}\n"));
}

#[test]
fn lowercase_type_is_titled() {
    let index = index(&[("status", &["statusOn"])]);

    let body = emit(&index, Config::default()).body().to_owned();

    assert!(body.contains("var validStatusValues = map[status]struct{}{\n"));
    assert!(body.contains("func (v status) ValidStatus() bool {\n"));
    assert!(body.contains("func StatusValues() []status {\n"));
}

#[test]
fn empty_index_yields_empty_body() {
    let ctx = emit(
        &TypeValueIndex::new(),
        Config {
            text_unmarshaling: true,
        },
    );

    assert_eq!(ctx.body(), "");
    assert_eq!(ctx.imports().count(), 0);
}

#[test]
fn header_without_imports() {
    assert_eq!(build_header("main", std::iter::empty()), "package main\n");
}

#[test]
fn header_with_sorted_imports() {
    let header = build_header("main", ["\"os\"", "\"fmt\"", "\"os\""]);

    assert_eq!(header, "package main\n\nimport (\n\t\"fmt\"\n\t\"os\"\n)\n");
}
