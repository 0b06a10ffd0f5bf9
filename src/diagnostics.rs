//! Failure diagnostics
//!
//! The engine reports a failure only as the remaining input where matching stopped. This
//! module is the layer on top: it turns that remainder into a line/column [`Position`] and
//! a typed [`ParseError`] for callers that want a message.

use std::fmt;

use serde::Serialize;

use crate::engine::Input;

/// A zero-based line/column position. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    /// Rendered one-based, the way editors count.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Converts byte offsets within a source to line/column positions.
pub struct SourceLocation<'a> {
    source: &'a str,
    /// Byte offsets where each line starts
    line_starts: Vec<usize>,
}

impl<'a> SourceLocation<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut line_starts = vec![0];
        for (byte_pos, ch) in source.char_indices() {
            if ch == '\n' {
                line_starts.push(byte_pos + 1);
            }
        }
        Self {
            source,
            line_starts,
        }
    }

    /// Convert a byte offset to a position. Offsets past the end map to the end.
    pub fn byte_to_position(&self, byte_offset: usize) -> Position {
        let byte_offset = byte_offset.min(self.source.len());
        let line = self
            .line_starts
            .binary_search(&byte_offset)
            .unwrap_or_else(|i| i - 1);
        let line_start = self.line_starts[line];
        let column = self
            .source
            .get(line_start..byte_offset)
            .map_or(0, |text| text.chars().count());
        Position::new(line, column)
    }

    /// Position of a remainder produced while parsing this source.
    pub fn locate(&self, rest: Input<'_>) -> Position {
        self.byte_to_position(rest.offset())
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }
}

/// Why a complete parse was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{grammar}: no match at {position} near {snippet:?}")]
    NoMatch {
        grammar: &'static str,
        position: Position,
        offset: usize,
        snippet: String,
    },
    #[error("{grammar}: unexpected trailing input at {position} near {snippet:?}")]
    TrailingInput {
        grammar: &'static str,
        position: Position,
        offset: usize,
        snippet: String,
    },
}

impl ParseError {
    pub fn no_match(grammar: &'static str, rest: Input<'_>, snippet_width: usize) -> Self {
        ParseError::NoMatch {
            grammar,
            position: SourceLocation::new(rest.source()).locate(rest),
            offset: rest.offset(),
            snippet: snippet(rest, snippet_width),
        }
    }

    pub fn trailing_input(grammar: &'static str, rest: Input<'_>, snippet_width: usize) -> Self {
        ParseError::TrailingInput {
            grammar,
            position: SourceLocation::new(rest.source()).locate(rest),
            offset: rest.offset(),
            snippet: snippet(rest, snippet_width),
        }
    }

    pub fn position(&self) -> Position {
        match self {
            ParseError::NoMatch { position, .. } | ParseError::TrailingInput { position, .. } => {
                *position
            }
        }
    }

    /// Byte offset into the source where the problem starts.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::NoMatch { offset, .. } | ParseError::TrailingInput { offset, .. } => {
                *offset
            }
        }
    }
}

fn snippet(rest: Input<'_>, width: usize) -> String {
    rest.as_str().chars().take(width).collect()
}
