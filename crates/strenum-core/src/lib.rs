#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for strenum.
//!
//! - `TargetTypes`: the type names code is generated for
//! - `DeclaredValue`: one constant of a target type, with its literal value
//! - `TypeValueIndex`: every discovered value, grouped by type in discovery order
//! - `SourceId` / `Span`: source locations shared by diagnostics and values

pub mod colors;
pub mod utils;

mod index;
mod source;

#[cfg(test)]
mod utils_tests;

pub use colors::Colors;
pub use index::{DeclaredValue, TargetTypes, TypeValueIndex};
pub use rowan::{TextRange, TextSize};
pub use source::{SourceId, Span};
