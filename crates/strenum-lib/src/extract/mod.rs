//! Collect the constants of the target types.
//!
//! Walks the resolver's declaration blocks in order, applies type
//! carry-down per block and asks the resolver for each value. The first
//! problem inside a block ends extraction of that block; values found
//! before it are kept and later blocks are still visited.

mod carry_down;


use strenum_core::utils::escape_invalid_utf8;
use strenum_core::{DeclaredValue, TargetTypes, TypeValueIndex};
use tracing::{debug, trace, warn};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::resolve::{Binding, DeclBlock, ResolveError, SemanticResolver, SpecType};

pub use carry_down::CarryDown;

/// Values found per target type, plus everything reported on the way.
#[derive(Debug, Default)]
pub struct Extraction {
    pub index: TypeValueIndex,
    pub diagnostics: Diagnostics,
}

/// Extract the values of `targets` from every block of `resolver`.
pub fn extract<R>(resolver: &R, targets: &TargetTypes) -> Extraction
where
    R: SemanticResolver + ?Sized,
{
    let mut extractor = Extractor {
        resolver,
        targets,
        out: Extraction::default(),
    };
    for block in resolver.const_blocks() {
        extractor.block(block);
    }
    extractor.report_missing_targets();

    debug!(
        types = extractor.out.index.len(),
        values = extractor.out.index.value_count(),
        errors = extractor.out.diagnostics.error_count(),
        "extracted constants"
    );
    extractor.out
}

struct Extractor<'a, R: ?Sized> {
    resolver: &'a R,
    targets: &'a TargetTypes,
    out: Extraction,
}

impl<R> Extractor<'_, R>
where
    R: SemanticResolver + ?Sized,
{
    fn block(&mut self, block: &DeclBlock) {
        let mut carry = CarryDown::new();

        for spec in &block.specs {
            let Some(ty) = carry.step(&spec.ty, spec.has_values) else {
                if let SpecType::Unsupported(written) = &spec.ty {
                    warn!(ty = %written, "skipping constant with unsupported type expression");
                }
                continue;
            };
            if !self.targets.contains(ty) {
                continue;
            }

            for binding in spec.bindings.iter().filter(|b| !b.is_blank()) {
                if !self.binding(ty, binding) {
                    return;
                }
            }
        }
    }

    /// Record one binding. Returns `false` if a diagnostic was reported.
    fn binding(&mut self, ty: &str, binding: &Binding) -> bool {
        match self.resolver.resolve(binding.id) {
            Ok(literal) => {
                trace!(
                    ty,
                    identifier = %binding.name,
                    literal = %escape_invalid_utf8(&literal),
                    "found value"
                );
                self.out
                    .index
                    .push(ty, DeclaredValue::new(&binding.name, literal, binding.span));
                true
            }
            Err(ResolveError::Unresolved { reason }) => {
                self.out
                    .diagnostics
                    .report(DiagnosticKind::UnresolvedConstant, binding.span)
                    .message(format!("{} ({})", binding.name, reason))
                    .type_name(ty)
                    .identifier(&binding.name)
                    .emit();
                false
            }
            Err(ResolveError::NonTextual { type_name }) => {
                self.out
                    .diagnostics
                    .report(DiagnosticKind::NonTextualConstant, binding.span)
                    .message(&type_name)
                    .type_name(ty)
                    .identifier(&binding.name)
                    .emit();
                false
            }
        }
    }

    fn report_missing_targets(&mut self) {
        for target in self.targets.iter() {
            if self.out.index.contains_type(target) {
                continue;
            }
            self.out
                .diagnostics
                .report_global(DiagnosticKind::MissingTargetType)
                .message(target)
                .type_name(target)
                .emit();
        }
    }
}
