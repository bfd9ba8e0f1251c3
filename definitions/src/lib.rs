//! Config definition codecs for the jagcfg archive format.
//!
//! This crate turns the records of a config archive into typed definitions
//! and back:
//! - The record loop: opcode, value, ..., terminator
//! - Record tables (`<domain>.idx` / `<domain>.dat`) inside an archive
//! - Per-domain suppliers with typed wrappers and named accessors
//! - Bulk load and store of a domain against an [`archive::Archive`]
//!
//! # Example
//!
//! ```
//! use definitions::domain::loc;
//!
//! let door = loc::SUPPLIER.decode(1530, b"\x02Door\n\x00").unwrap();
//! assert_eq!(door.name(), Some("Door"));
//! assert_eq!(loc::SUPPLIER.encode(&door).unwrap(), b"\x02Door\n\x00");
//! ```

mod definition;
pub mod domain;
mod error;
mod loader;
mod record;
mod supplier;
mod table;

pub use definition::ConfigDefinition;
pub use domain::Domain;
pub use error::{CodecError, CodecResult};
pub use loader::{load_definitions, store_definitions};
pub use record::{decode_properties, decode_record, encode_properties, encode_record, record_len};
pub use supplier::DefinitionSupplier;
pub use table::{
    decode_counted, join_counted, join_indexed, read_tables, split_indexed, write_tables, RecordLayout,
    MAX_RECORDS, MAX_RECORD_LEN,
};
