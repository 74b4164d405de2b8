//! Source spans, line/column locations and error locators

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A span in the source text, represented as a byte range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end offsets
    #[inline]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Create a zero-width span at a position
    #[inline]
    pub const fn point(pos: usize) -> Self {
        Self { start: pos, end: pos }
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Source location with line and column information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
    /// Byte offset from start (0-based)
    pub offset: usize,
    /// Length in bytes
    pub length: usize,
}

impl SourceLocation {
    pub const fn new(line: usize, column: usize, offset: usize, length: usize) -> Self {
        Self {
            line,
            column,
            offset,
            length,
        }
    }

    /// Get the span for this location
    pub const fn span(&self) -> Span {
        Span::new(self.offset, self.offset + self.length)
    }
}

impl Default for SourceLocation {
    fn default() -> Self {
        Self::new(1, 1, 0, 0)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line start offsets for repeated span-to-location lookups.
///
/// The parser converts the span of every statement it produces, so a linear
/// scan per statement would make large modules quadratic.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(source.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    /// Resolve a span to a 1-based line/column location.
    ///
    /// Columns count bytes, which matches characters for the ASCII keywords
    /// and punctuation that statements start with.
    pub fn location(&self, span: Span) -> SourceLocation {
        let line = match self.starts.binary_search(&span.start) {
            Ok(idx) => idx,
            Err(idx) => idx - 1,
        };
        let column = span.start - self.starts[line] + 1;
        SourceLocation::new(line + 1, column, span.start, span.len())
    }
}

/// Where a diagnostic points to.
///
/// Declarations synthesized outside any parsed file have no position and are
/// reported as `unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Locator {
    #[default]
    Unknown,
    Source {
        file: Arc<str>,
        location: SourceLocation,
    },
}

impl Locator {
    pub fn source(file: impl Into<Arc<str>>, location: SourceLocation) -> Self {
        Self::Source {
            file: file.into(),
            location,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn file(&self) -> Option<&str> {
        match self {
            Self::Unknown => None,
            Self::Source { file, .. } => Some(file),
        }
    }

    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Self::Unknown => None,
            Self::Source { location, .. } => Some(location),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Source { file, location } => {
                write!(f, "{}:{}:{}", file, location.line, location.column)
            }
        }
    }
}
