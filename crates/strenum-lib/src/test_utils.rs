//! Shared helpers for unit tests.

use crate::resolve::{BindingId, GoPackage, ResolveError, SemanticResolver};
use crate::{Error, SourceMap};

/// Load a single in-memory Go file as a package.
pub fn package(src: &str) -> GoPackage {
    GoPackage::from_sources(&SourceMap::one_liner(src)).unwrap()
}

/// Load several in-memory Go files as one package.
pub fn package_of(files: &[(&str, &str)]) -> Result<GoPackage, Error> {
    let mut sources = SourceMap::new();
    for (path, content) in files {
        sources.add_file(path, content);
    }
    GoPackage::from_sources(&sources)
}

/// Find the first binding with this name across all blocks.
pub fn binding(resolver: &impl SemanticResolver, name: &str) -> BindingId {
    resolver
        .const_blocks()
        .iter()
        .flat_map(|block| &block.specs)
        .flat_map(|spec| &spec.bindings)
        .find(|b| b.name == name)
        .map(|b| b.id)
        .unwrap_or_else(|| panic!("no constant named {name}"))
}

/// Resolve a constant by name to its raw bytes.
pub fn resolve_bytes(
    resolver: &impl SemanticResolver,
    name: &str,
) -> Result<Vec<u8>, ResolveError> {
    resolver.resolve(binding(resolver, name))
}

/// Resolve a constant by name, expecting UTF-8 text on success.
pub fn resolve(resolver: &impl SemanticResolver, name: &str) -> Result<String, ResolveError> {
    resolve_bytes(resolver, name)
        .map(|bytes| String::from_utf8(bytes).expect("constant value is not UTF-8"))
}

/// Resolve a constant by name, expecting an unresolved error; returns the reason.
pub fn unresolved_reason(resolver: &impl SemanticResolver, name: &str) -> String {
    match resolve(resolver, name) {
        Err(ResolveError::Unresolved { reason }) => reason,
        other => panic!("expected {name} to be unresolved, got {other:?}"),
    }
}
