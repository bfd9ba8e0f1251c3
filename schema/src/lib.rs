//! Opcode-addressed property schemas for the jagcfg config codecs.
//!
//! This crate defines how one config record is described:
//! - Property types, static or interned per numbered slot
//! - Declarative value codecs (integers, smarts, strings, lists, morphisms)
//! - Serializable properties with defaults and per-record values
//! - Domain schemas built once and instantiated per record
//! - Deterministic schema fingerprints
//!
//! # Design Principles
//!
//! - **Tables, not types** - A domain is a list of `(opcode, type, codec, default)` rows.
//! - **Schema / instance split** - The template is immutable; records own deep copies.
//! - **Sparse values** - A property is either at its default or holds a value of its own.

mod codec;
mod domain;
mod error;
mod hash;
mod map;
mod property;
mod types;
mod value;

pub use codec::{
    PropertyCodec, BYTE_LIST, COLOUR_MAP, HIDDEN_ACTION, MODEL_IDS, MODEL_IDS_WITH_TYPES,
    SEQUENCE_FRAMES,
};
pub use domain::{DomainSchema, DomainSchemaBuilder};
pub use error::{SchemaError, SchemaResult};
pub use hash::schema_fingerprint;
pub use map::ConfigPropertyMap;
pub use property::SerializableProperty;
pub use types::PropertyType;
pub use value::{Morphisms, PropertyValue, MORPHISM_COUNT_BIAS};

/// Record opcode that ends a record. Never a property opcode.
pub const TERMINATOR_OPCODE: u8 = 0;
