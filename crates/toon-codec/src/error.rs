//! Error types for decoding, encoding, and the buffered I/O wrappers.

use std::io;

use thiserror::Error;

/// What went wrong while decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    /// A line is indented more than one level deeper than its parent allows.
    #[error("unexpected indentation")]
    UnexpectedIndentation,

    /// A mapping line has no unquoted `:` separating key from value.
    #[error("missing ':' separator")]
    MissingColon,

    /// A value opens with `"` but never closes it.
    #[error("unterminated string")]
    UnterminatedString,

    /// An array header that matched the grammar far enough to commit but is
    /// internally inconsistent.
    #[error("malformed array header")]
    MalformedHeader,

    /// Strict mode: a tabular row has the wrong number of cells.
    #[error("row has {found} cells, expected {expected}")]
    RowLengthMismatch { expected: usize, found: usize },

    /// Strict mode: the element count differs from the declared length.
    #[error("array declared {declared} elements, found {found}")]
    LengthMismatch { declared: usize, found: usize },
}

/// A decode failure, located by byte offset into the input document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub offset: usize,
}

impl DecodeError {
    pub fn new(kind: DecodeErrorKind, offset: usize) -> Self {
        DecodeError { kind, offset }
    }

    /// Resolve the byte offset against the original document.
    pub fn location(&self, doc: &str) -> Location {
        Location::of_offset(doc, self.offset)
    }
}

/// A 1-based line/column position in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl Location {
    /// Compute the position of `offset` by counting newlines. Offsets past
    /// the end of the document clamp to the end.
    pub fn of_offset(doc: &str, offset: usize) -> Location {
        let offset = offset.min(doc.len());
        let before = &doc[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Location { line, column }
    }
}

/// What went wrong while encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// NaN or an infinity under the default [`NonFinite::Error`] policy.
    ///
    /// [`NonFinite::Error`]: crate::options::NonFinite::Error
    #[error("cannot encode non-finite number {value}")]
    NonFinite { value: f64 },

    /// An empty mapping inside a sequence has no field to carry the item
    /// marker and therefore no representation.
    #[error("cannot encode an empty mapping inside a sequence")]
    EmptyMappingItem,
}

/// Failures of the buffered reader/writer entry points.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
