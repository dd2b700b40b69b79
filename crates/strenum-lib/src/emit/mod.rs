//! Go code emission for validated indexes.

mod emitter;
mod header;

#[cfg(test)]
mod emit_tests;

pub use emitter::{EmissionContext, Emitter};
pub use header::build_header;

use strenum_core::TypeValueIndex;

/// Emission options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
    /// Also emit `UnmarshalText` for every type.
    pub text_unmarshaling: bool,
}

/// Emit the body for every type of `index`.
pub fn emit(index: &TypeValueIndex, config: Config) -> EmissionContext {
    Emitter::new(index, config).emit()
}
