//! Discovered constant values, grouped by type.

use std::borrow::Cow;

use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};

use crate::Span;
use crate::utils::escape_invalid_utf8;

/// Type names selected for generation.
///
/// Keeps the order names were configured in; lookups are by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetTypes(IndexSet<String>);

impl TargetTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for TargetTypes {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// One constant of a target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredValue {
    identifier: String,
    /// Go strings are byte sequences; equality is on bytes.
    #[serde(serialize_with = "serialize_literal")]
    literal: Vec<u8>,
    #[serde(skip)]
    span: Span,
}

impl DeclaredValue {
    pub fn new(identifier: impl Into<String>, literal: impl Into<Vec<u8>>, span: Span) -> Self {
        Self {
            identifier: identifier.into(),
            literal: literal.into(),
            span,
        }
    }

    /// Name the constant is bound to.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The resolved value, as bytes.
    pub fn literal(&self) -> &[u8] {
        &self.literal
    }

    /// The value as text, with bytes that are not UTF-8 written as `\xhh`.
    pub fn literal_text(&self) -> Cow<'_, str> {
        escape_invalid_utf8(&self.literal)
    }

    /// Location of the identifier in its source.
    pub fn span(&self) -> Span {
        self.span
    }
}

fn serialize_literal<S: Serializer>(literal: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&escape_invalid_utf8(literal))
}

/// Declared values per type name.
///
/// Types and their values are kept in discovery order. Emission must not rely
/// on type order (use [`TypeValueIndex::sorted`]); listing functions rely on
/// value order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TypeValueIndex(IndexMap<String, Vec<DeclaredValue>>);

impl TypeValueIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to the entry for `type_name`, creating it if needed.
    pub fn push(&mut self, type_name: &str, value: DeclaredValue) {
        match self.0.get_mut(type_name) {
            Some(values) => values.push(value),
            None => {
                self.0.insert(type_name.to_owned(), vec![value]);
            }
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&[DeclaredValue]> {
        self.0.get(type_name).map(Vec::as_slice)
    }

    pub fn contains_type(&self, type_name: &str) -> bool {
        self.0.contains_key(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of types with an entry.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Total number of values across all types.
    pub fn value_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Entries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[DeclaredValue])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Entries ordered by type name.
    pub fn sorted(&self) -> Vec<(&str, &[DeclaredValue])> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}
