use rowan::TextRange;

/// Lightweight handle to a source file in a generation run.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub struct SourceId(u32);

impl SourceId {
    #[inline]
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A byte range inside one source.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Span {
    pub source: SourceId,
    pub range: TextRange,
}

impl Span {
    pub fn new(source: SourceId, range: TextRange) -> Self {
        Self { source, range }
    }

    /// Build a span from a `start..end` byte range.
    ///
    /// Offsets beyond `u32::MAX` are clamped; sources that large are not supported.
    pub fn from_bytes(source: SourceId, bytes: std::ops::Range<usize>) -> Self {
        let start = u32::try_from(bytes.start).unwrap_or(u32::MAX);
        let end = u32::try_from(bytes.end).unwrap_or(u32::MAX).max(start);
        Self::new(source, TextRange::new(start.into(), end.into()))
    }
}
