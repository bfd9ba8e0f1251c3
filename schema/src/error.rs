//! Schema construction and property errors.

use buffer::BufferError;
use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors that can occur when building a schema or touching its properties.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// Opcode 0 terminates a record and cannot carry a property.
    #[error("property {property} uses the reserved terminator opcode")]
    ReservedOpcode { property: &'static str },

    /// Two properties of one domain share an opcode.
    #[error("opcode {opcode} is declared more than once")]
    DuplicateOpcode { opcode: u8 },

    /// Two properties of one domain share a type.
    #[error("property {property} is declared more than once")]
    DuplicateType { property: &'static str },

    /// A property was given a value its codec cannot carry.
    #[error("property {property} ({codec}) cannot hold a {found} value")]
    TypeMismatch {
        property: &'static str,
        codec: &'static str,
        found: &'static str,
    },

    /// A codec was asked to encode a value of the wrong shape.
    #[error("{codec} codec cannot encode a {found} value")]
    ValueMismatch {
        codec: &'static str,
        found: &'static str,
    },

    /// The property is not part of this domain.
    #[error("property {property} is not declared")]
    UnknownProperty { property: &'static str },

    /// A primitive read or write failed.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}
