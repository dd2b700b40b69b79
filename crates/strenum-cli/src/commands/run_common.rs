//! Helpers shared by the generate and dump commands.

use strenum_lib::{Diagnostics, Error, GenerateConfig, Generator, SourceMap, Validated};
use tracing::info;

use super::source_loader::load_sources;

/// Load sources and run every stage up to validation.
///
/// On failure, diagnostics (or the error message) are printed to stderr and
/// the process exits with status 1. Warnings are printed on success.
pub fn validated_or_exit(config: &GenerateConfig, color: bool) -> Validated {
    let sources = match load_sources(config.get_paths()) {
        Ok(map) => map,
        Err(msg) => {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }
    };
    info!(paths = ?config.get_paths(), files = sources.len(), "loaded sources");

    let result = Generator::new(sources.clone(), config)
        .resolve()
        .and_then(|resolved| resolved.extract())
        .and_then(|extracted| extracted.validate());

    match result {
        Ok(validated) => {
            report_warnings(validated.warnings(), &sources, color);
            validated
        }
        Err(err) => exit_with(&err, &sources, color),
    }
}

fn report_warnings(warnings: &Diagnostics, sources: &SourceMap, color: bool) {
    if !warnings.is_empty() {
        eprint!("{}", warnings.render_colored(sources, color));
    }
}

fn exit_with(err: &Error, sources: &SourceMap, color: bool) -> ! {
    match err.diagnostics() {
        Some(diagnostics) => eprint!("{}", diagnostics.render_colored(sources, color)),
        None => eprintln!("error: {}", err),
    }
    std::process::exit(1);
}
