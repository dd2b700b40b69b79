//! Type carry-down inside one constant declaration block.

use crate::resolve::SpecType;

/// Folds the effective type across the specs of one block.
///
/// A fresh value must be used for every block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarryDown {
    current: Option<String>,
}

impl CarryDown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance over one spec and return its effective type.
    ///
    /// `None` means the spec has no usable type and is skipped.
    pub fn step(&mut self, ty: &SpecType, has_values: bool) -> Option<&str> {
        match ty {
            SpecType::Named(name) => {
                self.current = Some(name.clone());
                self.current.as_deref()
            }
            // Leaves the carried type untouched.
            SpecType::Unsupported(_) => None,
            SpecType::Inferred if has_values => {
                self.current = None;
                None
            }
            SpecType::Inferred => self.current.as_deref(),
        }
    }
}
