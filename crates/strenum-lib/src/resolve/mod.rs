//! Semantic view of a Go package.
//!
//! The pipeline never looks at syntax trees. It sees constant declaration
//! blocks through [`SemanticResolver`] and asks the resolver for the value
//! of each binding it cares about.

pub mod go;


use strenum_core::Span;

pub use go::GoPackage;

/// Handle to one constant binding of a resolver.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct BindingId(u32);

impl BindingId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// One name bound by a constant spec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub id: BindingId,
    pub name: String,
    pub span: Span,
}

impl Binding {
    pub fn is_blank(&self) -> bool {
        self.name == "_"
    }
}

/// The type written on a constant spec, as far as extraction cares.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpecType {
    /// No type written.
    Inferred,
    /// A plain type name, such as `Status` or `string`.
    Named(String),
    /// Any other type expression (`pkg.T`, `*T`, `T[int]`), kept as written.
    Unsupported(String),
}

/// One line of a `const` declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstSpec {
    pub bindings: Vec<Binding>,
    pub ty: SpecType,
    pub has_values: bool,
    pub span: Span,
}

/// A whole `const` declaration, parenthesized or not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclBlock {
    pub specs: Vec<ConstSpec>,
    pub span: Span,
}

/// Why a binding has no usable text value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveError {
    /// The value could not be computed.
    Unresolved { reason: String },
    /// The value exists but its type is not string-backed.
    NonTextual { type_name: String },
}

/// Narrow interface between the pipeline and a language front end.
pub trait SemanticResolver {
    /// Name of the package all sources belong to.
    fn package_name(&self) -> &str;

    /// Constant declaration blocks, in file order then document order.
    fn const_blocks(&self) -> &[DeclBlock];

    /// Value of a constant binding. Go strings are byte strings and need
    /// not be UTF-8.
    fn resolve(&self, binding: BindingId) -> Result<Vec<u8>, ResolveError>;
}
