use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::PathBuf;

use serde::Serialize;
use strenum_core::utils::go_quote;
use strenum_core::{Colors, DeclaredValue, TypeValueIndex};
use strenum_lib::GenerateConfig;

use super::run_common::validated_or_exit;

pub struct DumpArgs {
    pub paths: Vec<PathBuf>,
    pub type_names: Vec<String>,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let config = GenerateConfig::new()
        .paths(&args.paths)
        .type_names(args.type_names.iter().cloned());
    let validated = validated_or_exit(&config, args.color);

    if args.json {
        match to_json(validated.package_name(), validated.index()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let colors = Colors::new(args.color);
    print!(
        "{}",
        format_values(validated.package_name(), validated.index(), colors)
    );
}

#[derive(Serialize)]
struct DumpOutput<'a> {
    package: &'a str,
    types: BTreeMap<&'a str, &'a [DeclaredValue]>,
}

/// Types in name order, each mapping to its values in declaration order.
pub fn to_json(package: &str, index: &TypeValueIndex) -> serde_json::Result<String> {
    let output = DumpOutput {
        package,
        types: index.iter().collect(),
    };
    serde_json::to_string_pretty(&output)
}

/// One block per type: a header line, then `identifier = "literal"` lines
/// with literals quoted the way Go writes them.
pub fn format_values(package: &str, index: &TypeValueIndex, colors: Colors) -> String {
    let Colors {
        blue,
        green,
        dim,
        reset,
    } = colors;

    let mut out = String::new();
    let _ = writeln!(out, "{dim}package{reset} {package}");
    for (name, values) in index.sorted() {
        let noun = if values.len() == 1 { "value" } else { "values" };
        let _ = writeln!(
            out,
            "\n{blue}{name}{reset} {dim}({} {noun}){reset}",
            values.len()
        );
        for value in values {
            let _ = writeln!(
                out,
                "  {} {dim}={reset} {green}{}{reset}",
                value.identifier(),
                go_quote(value.literal())
            );
        }
    }
    out
}
