//! Go front end on top of tree-sitter.
//!
//! Parses every file of a [`SourceMap`], checks they form one package,
//! collects type and constant declarations and evaluates all constants
//! up front.

mod eval;
mod literal;
mod syntax;
mod types;

#[cfg(test)]
mod literal_tests;

use arborium_tree_sitter::{Language, Parser, Tree};
use indexmap::IndexSet;
use strenum_core::{SourceId, Span};
use tracing::{debug, trace};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::resolve::{BindingId, DeclBlock, ResolveError, SemanticResolver};
use crate::{Error, Result, SourceMap};

use eval::{ConstScopes, ConstType, EvalResult, Evaluator, Untyped, Value};
use syntax::{ConstDef, PackageSyntax};
use types::{BasicKind, TypeTable, Underlying};

/// A loaded and evaluated Go package.
#[derive(Debug)]
pub struct GoPackage {
    name: String,
    blocks: Vec<DeclBlock>,
    consts: Vec<ConstDef>,
    types: TypeTable,
    values: Vec<EvalResult>,
}

impl GoPackage {
    /// Parse and evaluate all sources as one package.
    pub fn from_sources(sources: &SourceMap) -> Result<Self> {
        let mut parser = go_parser()?;
        let mut syntax = PackageSyntax::default();
        let mut diagnostics = Diagnostics::new();

        for source in sources.iter() {
            trace!(source = source.kind.display_name(), "parsing");
            let tree = parse(&mut parser, source.content)?;
            syntax::report_syntax_errors(&tree, source.id, source.content, &mut diagnostics);
            syntax::lower_file(&tree, source.id, source.content, &mut syntax);
        }

        for (idx, name) in syntax.package_names.iter().enumerate() {
            if name.is_none() {
                let source = SourceId::from_raw(idx as u32);
                diagnostics
                    .report(DiagnosticKind::SyntaxError, Span::from_bytes(source, 0..0))
                    .message("expected package clause")
                    .emit();
            }
        }

        if diagnostics.has_errors() {
            return Err(Error::Parse(diagnostics));
        }

        let name = single_package(&syntax.package_names)?;
        let PackageSyntax {
            blocks,
            consts,
            types,
            scopes,
            ..
        } = syntax;

        let types = TypeTable::new(&types, &scopes);
        let scopes = ConstScopes::new(&consts, &scopes);
        let values = Evaluator::new(&consts, &scopes, &types).evaluate_all();

        debug!(
            package = %name,
            blocks = blocks.len(),
            constants = consts.len(),
            "resolved Go package"
        );

        Ok(Self {
            name,
            blocks,
            consts,
            types,
            values,
        })
    }
}

impl SemanticResolver for GoPackage {
    fn package_name(&self) -> &str {
        &self.name
    }

    fn const_blocks(&self) -> &[DeclBlock] {
        &self.blocks
    }

    fn resolve(&self, binding: BindingId) -> std::result::Result<Vec<u8>, ResolveError> {
        let (Some(def), Some(result)) = (
            self.consts.get(binding.index()),
            self.values.get(binding.index()),
        ) else {
            return Err(ResolveError::Unresolved {
                reason: "unknown binding".to_string(),
            });
        };

        let constant = result.as_ref().map_err(|reason| ResolveError::Unresolved {
            reason: reason.clone(),
        })?;
        trace!(name = %def.name, ty = %constant.ty, "resolving constant");

        let textual = match &constant.ty {
            ConstType::Untyped(kind) => *kind == Untyped::String,
            ConstType::Named(ty) => match self.types.underlying(ty, def.scope) {
                Underlying::Basic(kind) => kind == BasicKind::String,
                Underlying::Composite(_) => false,
                Underlying::Unknown(reason) => {
                    return Err(ResolveError::Unresolved { reason });
                }
            },
        };
        if !textual {
            return Err(ResolveError::NonTextual {
                type_name: constant.ty.to_string(),
            });
        }

        match &constant.value {
            Value::Str(text) => Ok(text.clone()),
            _ => Err(ResolveError::Unresolved {
                reason: format!("{} is not a string value", def.name),
            }),
        }
    }
}

fn go_parser() -> Result<Parser> {
    let language: Language = arborium_go::language().into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|err| Error::Parser(err.to_string()))?;
    Ok(parser)
}

fn parse(parser: &mut Parser, text: &str) -> Result<Tree> {
    parser
        .parse(text, None)
        .ok_or_else(|| Error::Parser("parser returned no tree".to_string()))
}

/// The one package name shared by all files.
fn single_package(names: &[Option<String>]) -> Result<String> {
    let distinct: IndexSet<&String> = names.iter().flatten().collect();
    let mut sorted: Vec<String> = distinct.iter().map(|n| n.to_string()).collect();
    sorted.sort();

    if sorted.len() == 1 {
        return Ok(sorted.remove(0));
    }
    Err(Error::ModuleResolution {
        found: sorted.len(),
        names: sorted,
    })
}
