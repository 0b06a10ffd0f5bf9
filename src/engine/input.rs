//! Parser input
//!
//! An [`Input`] is a view of the unconsumed suffix of a source. It keeps the whole source
//! and an offset instead of a bare slice so that any remainder handed back by a parser can
//! be traced to its position in the original.
//!
//! Sources are text by default (`Input<'a>` is `Input<'a, str>`, offsets in bytes). A slice
//! of items, such as a token stream, works the same way with offsets counted in items.

use std::fmt;

/// A source a parser can walk through.
pub trait Stream {
    /// The offset one past the last item.
    fn end_offset(&self) -> usize;

    /// Everything from `offset` on.
    fn suffix(&self, offset: usize) -> &Self;
}

impl Stream for str {
    fn end_offset(&self) -> usize {
        self.len()
    }

    fn suffix(&self, offset: usize) -> &Self {
        &self[offset..]
    }
}

impl<T> Stream for [T] {
    fn end_offset(&self) -> usize {
        self.len()
    }

    fn suffix(&self, offset: usize) -> &Self {
        &self[offset..]
    }
}

/// The unconsumed suffix of a source.
pub struct Input<'a, I: ?Sized + Stream = str> {
    source: &'a I,
    offset: usize,
    depth: usize,
}

impl<I: ?Sized + Stream> Clone for Input<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I: ?Sized + Stream> Copy for Input<'_, I> {}

/// Two inputs are equal when they denote the same suffix of equal sources. Nesting depth
/// is bookkeeping and is not compared.
impl<I: ?Sized + Stream + PartialEq> PartialEq for Input<'_, I> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.source == other.source
    }
}

impl<I: ?Sized + Stream + Eq> Eq for Input<'_, I> {}

impl<'a, I: ?Sized + Stream> Input<'a, I> {
    /// Start at the beginning of `source`.
    pub fn new(source: &'a I) -> Self {
        Self {
            source,
            offset: 0,
            depth: 0,
        }
    }

    /// The full source this input was cut from.
    pub fn source(&self) -> &'a I {
        self.source
    }

    /// Offset of this input within [`Input::source`].
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.source.end_offset()
    }

    /// What is left of the source.
    pub fn remaining(&self) -> &'a I {
        self.source.suffix(self.offset)
    }

    /// The same source positioned at `offset`, clamped to the end of the source.
    ///
    /// Offsets come from spans produced while parsing this source, so for text they always
    /// fall on a character boundary.
    pub(crate) fn at(&self, offset: usize) -> Self {
        Input {
            offset: offset.min(self.source.end_offset()),
            ..*self
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// One recursion level deeper.
    pub(crate) fn descend(&self) -> Self {
        Input {
            depth: self.depth + 1,
            ..*self
        }
    }

    pub(crate) fn with_depth(&self, depth: usize) -> Self {
        Input { depth, ..*self }
    }

    fn advance(&self, by: usize) -> Self {
        self.at(self.offset + by)
    }
}

impl<'a> Input<'a, str> {
    /// The remaining text.
    pub fn as_str(&self) -> &'a str {
        self.remaining()
    }

    /// Number of remaining characters.
    pub fn len_chars(&self) -> usize {
        self.as_str().chars().count()
    }

    pub fn first(&self) -> Option<char> {
        self.as_str().chars().next()
    }

    /// Split off the first character, returning it together with the input after it.
    pub fn split_first(&self) -> Option<(char, Self)> {
        let c = self.first()?;
        Some((c, self.advance(c.len_utf8())))
    }

    /// If the remaining text starts with `prefix`, return the input after it.
    pub fn strip_prefix(&self, prefix: &str) -> Option<Self> {
        self.as_str()
            .starts_with(prefix)
            .then(|| self.advance(prefix.len()))
    }

    /// Text consumed between `earlier` and this input.
    ///
    /// `earlier` must come from the same source and not lie after `self`; otherwise the
    /// result is empty.
    pub fn consumed_since(&self, earlier: Self) -> &'a str {
        if earlier.offset > self.offset {
            return "";
        }
        &self.source[earlier.offset..self.offset]
    }
}

impl<'a, T> Input<'a, [T]> {
    /// The remaining items.
    pub fn as_slice(&self) -> &'a [T] {
        self.remaining()
    }

    pub fn first(&self) -> Option<&'a T> {
        self.as_slice().first()
    }

    /// Split off the first item, returning it together with the input after it.
    pub fn split_first(&self) -> Option<(&'a T, Self)> {
        let item = self.first()?;
        Some((item, self.advance(1)))
    }
}

impl<I: ?Sized + Stream + fmt::Debug> fmt::Debug for Input<'_, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input@{}({:?})", self.offset, self.remaining())
    }
}
