//! Error types for definition record codecs.

use archive::ArchiveError;
use schema::SchemaError;
use thiserror::Error;

/// Result type for definition codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while decoding or encoding definition records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// Archive container error.
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    /// A record names an opcode its domain does not declare.
    #[error("unknown opcode {opcode} in {domain} record {id}")]
    UnknownOpcode {
        domain: &'static str,
        id: i32,
        opcode: u8,
    },

    /// The record's bytes ran out before its terminator.
    #[error("{domain} record {id} ends before its terminator")]
    TruncatedRecord { domain: &'static str, id: i32 },

    /// Bytes remain after a record's terminator.
    #[error("{domain} record {id} has {remaining} bytes after its terminator")]
    TrailingRecordData {
        domain: &'static str,
        id: i32,
        remaining: usize,
    },

    /// A property value could not be decoded or encoded.
    #[error("invalid value in {domain} record {id}: {source}")]
    InvalidValue {
        domain: &'static str,
        id: i32,
        #[source]
        source: SchemaError,
    },

    /// The record table framing is inconsistent.
    #[error("malformed {domain} record table: {reason}")]
    MalformedRecordTable { domain: &'static str, reason: String },

    /// A record does not fit the index's length field.
    #[error("{domain} record {id} is {len} bytes, over the {max} byte limit")]
    RecordTooLarge {
        domain: &'static str,
        id: i32,
        len: usize,
        max: usize,
    },

    /// Two definitions share an id.
    #[error("duplicate {domain} definition {id}")]
    DuplicateDefinition { domain: &'static str, id: i32 },
}

impl CodecError {
    pub(crate) fn malformed(domain: &'static str, reason: impl Into<String>) -> Self {
        Self::MalformedRecordTable {
            domain,
            reason: reason.into(),
        }
    }
}
