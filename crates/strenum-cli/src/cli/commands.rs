//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("strenum")
        .about("Validation and listing code for Go string enums")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(generate_command())
        .subcommand(dump_command())
}

/// Generate Go code for the target types.
pub fn generate_command() -> Command {
    Command::new("generate")
        .about("Generate validation code for Go string enums")
        .override_usage(
            "\
  strenum generate [PATHS]... --type <TYPE>... [--text] [-o <FILE>]",
        )
        .after_help(
            r#"EXAMPLES:
  strenum generate --type Status                     # package in current dir
  strenum generate ./status --type Status --text     # with UnmarshalText
  strenum generate -t Status,Level -o enums_gen.go   # several types
  strenum generate a.go b.go -t Status               # explicit files"#,
        )
        .arg(paths_arg())
        .arg(type_arg())
        .arg(text_arg())
        .arg(output_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}

/// Show the values discovered for the target types.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show discovered enum values")
        .override_usage(
            "\
  strenum dump [PATHS]... --type <TYPE>... [--json]",
        )
        .after_help(
            r#"EXAMPLES:
  strenum dump --type Status            # values per type
  strenum dump ./status -t Status --json"#,
        )
        .arg(paths_arg())
        .arg(type_arg())
        .arg(json_arg())
        .arg(color_arg())
        .arg(verbose_arg())
}
