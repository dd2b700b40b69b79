//! Duplicate value detection.
//!
//! Every type is checked on its own. One diagnostic is reported per
//! repeated literal, pointing at its first repetition and linking the
//! original declaration.

use std::collections::HashMap;

use strenum_core::{DeclaredValue, TypeValueIndex};
use tracing::debug;

use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Check that no type declares the same literal twice.
///
/// Diagnostics are ordered by type name, then by the position of the first
/// repetition within the type.
pub fn validate(index: &TypeValueIndex) -> Diagnostics {
    let mut diagnostics = Diagnostics::new();

    for (type_name, values) in index.sorted() {
        for (first, repeat) in duplicates(values) {
            let literal = repeat.literal_text();
            diagnostics
                .report(DiagnosticKind::DuplicateValue, repeat.span())
                .message(format!(
                    "the type {} has multiple values of {}",
                    type_name, literal
                ))
                .related_to(
                    format!("{} first declared here", first.identifier()),
                    first.span(),
                )
                .type_name(type_name)
                .identifier(repeat.identifier())
                .value(literal)
                .emit();
        }
    }

    debug!(
        types = index.len(),
        duplicates = diagnostics.len(),
        "validated values"
    );
    diagnostics
}

/// `(first occurrence, first repetition)` per repeated literal, in order of repetition.
///
/// Literals are compared as bytes, so distinct invalid UTF-8 sequences
/// never collide.
fn duplicates(values: &[DeclaredValue]) -> Vec<(&DeclaredValue, &DeclaredValue)> {
    let mut seen: HashMap<&[u8], (usize, bool)> = HashMap::with_capacity(values.len());
    let mut found = Vec::new();

    for (idx, value) in values.iter().enumerate() {
        match seen.get_mut(value.literal()) {
            None => {
                seen.insert(value.literal(), (idx, false));
            }
            Some((first, reported)) => {
                if !*reported {
                    *reported = true;
                    found.push((&values[*first], value));
                }
            }
        }
    }

    found
}
