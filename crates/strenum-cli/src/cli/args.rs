//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that is composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Go files or package directories (positional, repeatable).
pub fn paths_arg() -> Arg {
    Arg::new("paths")
        .value_name("PATHS")
        .num_args(1..)
        .default_value(".")
        .value_parser(value_parser!(PathBuf))
        .help("Go files or package directory")
}

/// Target type names (-t/--type), repeatable and comma separated.
pub fn type_arg() -> Arg {
    Arg::new("type")
        .short('t')
        .long("type")
        .value_name("TYPE")
        .required(true)
        .action(ArgAction::Append)
        .value_delimiter(',')
        .help("Type to generate for (repeatable, or comma separated)")
}

/// Emit `UnmarshalText` methods (--text).
pub fn text_arg() -> Arg {
    Arg::new("text")
        .long("text")
        .action(ArgAction::SetTrue)
        .help("Also generate UnmarshalText methods")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write generated code to FILE instead of stdout")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print discovered values as JSON")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .help("Log progress to stderr (-vv for more)")
}
