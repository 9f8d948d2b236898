//! Source locations for parsed blocks.
//!
//! Every [`Block`](crate::ast::Block) records the byte range of the source
//! lines it was built from, so tools can map rendered output back to input.

/// A byte range in the source text, `[start, end)`.
///
/// # Example
///
/// ```rust
/// use syntaq_core::span::Span;
///
/// let span = Span::new(4, 10);
/// assert_eq!(span.len(), 6);
/// assert_eq!(span.slice("foo\nbar baz\n"), "bar ba");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting byte offset (inclusive).
    pub start: u32,
    /// Ending byte offset (exclusive).
    pub end: u32,
}

impl Span {
    /// Create a new span from byte offsets.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Extend this span so that it also covers `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Borrow the covered text from `source`.
    ///
    /// Returns an empty string when the span does not fall on valid
    /// boundaries of `source`.
    #[inline]
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(self.start as usize..self.end as usize)
            .unwrap_or("")
    }
}
