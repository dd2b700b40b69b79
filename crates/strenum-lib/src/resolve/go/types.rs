//! Named types of a package and their underlying basic kinds.

use std::collections::{HashMap, HashSet};
use std::fmt;

use super::syntax::{ScopeId, ScopeTree, TypeDef, TypeExpr};

/// Kind of a predeclared basic type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BasicKind {
    Bool,
    Int,
    Float,
    Complex,
    String,
}

impl BasicKind {
    pub(crate) fn predeclared(name: &str) -> Option<Self> {
        Some(match name {
            "string" => Self::String,
            "bool" => Self::Bool,
            "int" | "int8" | "int16" | "int32" | "int64" | "uint" | "uint8" | "uint16"
            | "uint32" | "uint64" | "uintptr" | "byte" | "rune" => Self::Int,
            "float32" | "float64" => Self::Float,
            "complex64" | "complex128" => Self::Complex,
            _ => return None,
        })
    }
}

impl fmt::Display for BasicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bool => "bool",
            Self::Int => "integer",
            Self::Float => "float",
            Self::Complex => "complex",
            Self::String => "string",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Underlying {
    Basic(BasicKind),
    /// Struct, slice, map, pointer and other non-basic types.
    Composite(String),
    /// The name does not resolve; holds the reason.
    Unknown(String),
}

/// Type declarations keyed by scope and name. The first declaration in a
/// scope wins, and inner scopes shadow the ones enclosing them.
#[derive(Debug, Default)]
pub(crate) struct TypeTable {
    defs: HashMap<(ScopeId, String), TypeExpr>,
    tree: ScopeTree,
}

impl TypeTable {
    pub(crate) fn new(defs: &[TypeDef], tree: &ScopeTree) -> Self {
        let mut table = HashMap::new();
        for def in defs {
            table
                .entry((def.scope, def.name.clone()))
                .or_insert_with(|| def.target.clone());
        }
        Self {
            defs: table,
            tree: tree.clone(),
        }
    }

    /// The declaration of `name` visible from `scope`, with the scope it
    /// was declared in.
    fn lookup(&self, name: &str, scope: ScopeId) -> Option<(ScopeId, &TypeExpr)> {
        self.tree.chain(scope).find_map(|scope| {
            self.defs
                .get(&(scope, name.to_owned()))
                .map(|target| (scope, target))
        })
    }

    /// Follow a type name through declarations down to its underlying type.
    pub(crate) fn underlying(&self, name: &str, scope: ScopeId) -> Underlying {
        let mut seen = HashSet::new();
        let mut current = name.to_owned();
        let mut scope = scope;
        loop {
            if !seen.insert((scope, current.clone())) {
                return Underlying::Unknown(format!("invalid recursive type {name}"));
            }
            match self.lookup(&current, scope) {
                Some((declared_in, TypeExpr::Name(next))) => {
                    // The target is resolved where the type was declared.
                    scope = declared_in;
                    current = next.clone();
                }
                Some((_, TypeExpr::Other(written))) => {
                    return Underlying::Composite(written.clone());
                }
                None => {
                    return match BasicKind::predeclared(&current) {
                        Some(kind) => Underlying::Basic(kind),
                        None => Underlying::Unknown(format!("undefined type {current}")),
                    };
                }
            }
        }
    }
}
