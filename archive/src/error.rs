//! Error types for archive operations.

use thiserror::Error;

/// Result type for archive operations.
pub type ArchiveResult<T> = Result<T, ArchiveError>;

/// High-level errors for archive decoding, encoding and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ArchiveError {
    /// Length fields are inconsistent with the bytes present.
    #[error("malformed archive: {0}")]
    Malformed(#[from] FramingError),

    /// A compressed block could not be inflated to its declared length.
    #[error("decompression failed: {0}")]
    Decompression(#[from] DecompressionError),

    /// The compressor rejected its input or produced an unexpected stream.
    #[error("compression failed: {reason}")]
    Compression { reason: String },

    /// No entry carries the requested identifier.
    #[error("entry {id} not found")]
    EntryNotFound { id: i32 },

    /// Two entries share one identifier.
    #[error("duplicate entry {id}")]
    DuplicateEntry { id: i32 },

    /// The byte-range provider has no file at the requested coordinates.
    #[error("file {file} not found in index {index}")]
    FileNotFound { index: u8, file: u32 },
}

/// Errors in the container's length framing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FramingError {
    /// A section declares more bytes than remain in the buffer.
    #[error("truncated {section}: need {needed} bytes, have {available}")]
    Truncated {
        section: &'static str,
        needed: usize,
        available: usize,
    },

    /// A length does not fit the tri-byte field that must carry it.
    #[error("{field} of {length} bytes exceeds the tri-byte range")]
    LengthOverflow { field: &'static str, length: usize },

    /// A compressed block is exactly as long as its raw bytes, so a reader
    /// comparing the two lengths would take it for uncompressed data.
    #[error("compressed {field} of {length} bytes matches its raw length")]
    AmbiguousCompression { field: &'static str, length: usize },

    /// More entries than the u16 entry count can describe.
    #[error("{count} entries exceed the entry table capacity")]
    TooManyEntries { count: usize },
}

/// Errors raised while inflating a compressed block.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecompressionError {
    /// The stream inflated to a different length than declared.
    #[error("expected {expected} bytes but the stream produced {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// The stream is not valid compressed data.
    #[error("corrupt stream: {reason}")]
    Corrupt { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_display() {
        let err = ArchiveError::from(FramingError::Truncated {
            section: "entry table",
            needed: 12,
            available: 4,
        });
        let msg = err.to_string();
        assert!(msg.contains("malformed"));
        assert!(msg.contains("entry table"));
        assert!(msg.contains("12"));
    }

    #[test]
    fn decompression_display() {
        let err = ArchiveError::from(DecompressionError::LengthMismatch {
            expected: 10,
            actual: 4,
        });
        let msg = err.to_string();
        assert!(msg.contains("decompression"));
        assert!(msg.contains("10"));
    }

    #[test]
    fn entry_not_found_display() {
        let err = ArchiveError::EntryNotFound { id: -1 };
        assert_eq!(err.to_string(), "entry -1 not found");
    }

    #[test]
    fn ambiguous_compression_display() {
        let err = ArchiveError::from(FramingError::AmbiguousCompression {
            field: "payload",
            length: 1609,
        });
        let msg = err.to_string();
        assert!(msg.contains("malformed"));
        assert!(msg.contains("1609"));
    }

    #[test]
    fn overflow_display() {
        let err = FramingError::LengthOverflow {
            field: "payload",
            length: 1 << 24,
        };
        assert!(err.to_string().contains("16777216"));
    }
}
