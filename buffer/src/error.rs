//! Error types for byte cursor operations.

use thiserror::Error;

/// Result type for byte cursor operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// Errors that can occur while reading or writing cache bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    #[error("attempted to read {requested} bytes but only {available} bytes available")]
    UnexpectedEof {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },

    /// Value cannot be represented by the requested encoding.
    #[error("value {value} cannot be encoded as {encoding}")]
    ValueOutOfRange {
        /// The value that was out of range.
        value: i64,
        /// Name of the encoding that rejected it.
        encoding: &'static str,
    },

    /// A terminated string ran to the end of the buffer.
    #[error("string is missing its 0x{terminator:02X} terminator")]
    UnterminatedString { terminator: u8 },

    /// A string contains a character outside the single-byte range, or the
    /// terminator itself.
    #[error("character {found:?} cannot be written as a single string byte")]
    UnmappableChar { found: char },
}
