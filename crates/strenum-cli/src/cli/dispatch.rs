//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::generate::GenerateArgs;

pub struct GenerateParams {
    pub paths: Vec<PathBuf>,
    pub type_names: Vec<String>,
    pub text: bool,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
    pub verbosity: u8,
}

impl GenerateParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            paths: parse_paths(m),
            type_names: parse_type_names(m),
            text: m.get_flag("text"),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
            verbosity: m.get_count("verbose"),
        }
    }
}

impl From<GenerateParams> for GenerateArgs {
    fn from(p: GenerateParams) -> Self {
        Self {
            paths: p.paths,
            type_names: p.type_names,
            text: p.text,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

pub struct DumpParams {
    pub paths: Vec<PathBuf>,
    pub type_names: Vec<String>,
    pub json: bool,
    pub color: ColorChoice,
    pub verbosity: u8,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            paths: parse_paths(m),
            type_names: parse_type_names(m),
            json: m.get_flag("json"),
            color: parse_color(m),
            verbosity: m.get_count("verbose"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            paths: p.paths,
            type_names: p.type_names,
            json: p.json,
            // JSON is for machines.
            color: !p.json && p.color.should_colorize(),
        }
    }
}

fn parse_paths(m: &ArgMatches) -> Vec<PathBuf> {
    m.get_many::<PathBuf>("paths")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

/// Blank entries from stray commas (`-t A,`) are dropped.
fn parse_type_names(m: &ArgMatches) -> Vec<String> {
    m.get_many::<String>("type")
        .map(|values| {
            values
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
