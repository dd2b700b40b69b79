//! strenum: validation, listing and text-unmarshal code for Go string enums.
//!
//! The pipeline runs in stages, each consuming the previous one:
//! - `resolve` - load the Go package and evaluate its constants
//! - `extract` - collect constants of the target types, with type carry-down
//! - `validate` - reject types that declare the same value twice
//! - `emit` - generate the Go body and the package header
//!
//! # Example
//!
//! ```no_run
//! use strenum_lib::{GenerateConfig, Generator};
//!
//! let config = GenerateConfig::new()
//!     .paths(["./internal/status"])
//!     .type_names(["Status"])
//!     .text_unmarshaling(true);
//!
//! let generated = Generator::load(&config)?
//!     .resolve()?
//!     .extract()?
//!     .validate()?
//!     .emit();
//! print!("{}", generated.to_source());
//! # Ok::<(), strenum_lib::Error>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod build_constraints;
pub mod diagnostics;
pub mod emit;
pub mod extract;
pub mod pipeline;
pub mod resolve;
pub mod source_map;
pub mod validate;

#[cfg(test)]
mod pipeline_tests;
#[cfg(test)]
pub mod test_utils;
#[cfg(test)]
mod validate_tests;

use std::path::PathBuf;

pub use diagnostics::{DiagnosticKind, Diagnostics, DiagnosticsPrinter, Severity};
pub use pipeline::{
    Extracted, GenerateConfig, Generated, Generator, Resolved, Validated, generate,
};
pub use source_map::{SourceKind, SourceMap};

pub use strenum_core::{DeclaredValue, SourceId, Span, TargetTypes, TypeValueIndex};

/// Errors that stop a generation run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Go parser failed: {0}")]
    Parser(String),

    #[error("no Go source files found in {}", format_paths(.0))]
    NoSources(Vec<PathBuf>),

    /// The sources do not form exactly one package.
    #[error("{found} packages found{}", format_names(.names))]
    ModuleResolution { found: usize, names: Vec<String> },

    #[error("parsing failed with {} errors", .0.error_count())]
    Parse(Diagnostics),

    #[error("constant extraction failed with {} errors", .0.error_count())]
    Extraction(Diagnostics),

    #[error("value validation failed with {} errors", .0.error_count())]
    Validation(Diagnostics),
}

impl Error {
    /// Diagnostics carried by this error, if any.
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        match self {
            Self::Parse(d) | Self::Extraction(d) | Self::Validation(d) => Some(d),
            _ => None,
        }
    }
}

/// Result type for generation operations.
pub type Result<T> = std::result::Result<T, Error>;

fn format_paths(paths: &[PathBuf]) -> String {
    let shown: Vec<_> = paths.iter().map(|p| format!("'{}'", p.display())).collect();
    shown.join(", ")
}

fn format_names(names: &[String]) -> String {
    if names.is_empty() {
        return String::new();
    }
    format!(": {}", names.join(", "))
}
