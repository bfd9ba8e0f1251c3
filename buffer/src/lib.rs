//! Byte cursor primitives for the jagcfg cache codecs.
//!
//! This crate provides [`ByteReader`] and [`ByteWriter`], the single cursor
//! implementation every container and record codec in the workspace shares.
//! All multi-byte values are big-endian.
//!
//! # Design Principles
//!
//! - **No unsafe code** - Safety is paramount.
//! - **Bounded operations** - All reads are bounds-checked.
//! - **No domain knowledge** - This crate knows nothing about archives or definitions.
//! - **Explicit errors** - All failures return structured errors, never panic.
//!
//! # Example
//!
//! ```
//! use buffer::{ByteReader, ByteWriter};
//!
//! let mut writer = ByteWriter::new();
//! writer.write_u24(65536).unwrap();
//! writer.write_smart(5).unwrap();
//! writer.write_string("Door").unwrap();
//!
//! let bytes = writer.finish();
//!
//! let mut reader = ByteReader::new(&bytes);
//! assert_eq!(reader.read_u24().unwrap(), 65536);
//! assert_eq!(reader.read_smart().unwrap(), 5);
//! assert_eq!(reader.read_string().unwrap(), "Door");
//! ```

mod error;
mod reader;
mod writer;

pub use error::{BufferError, BufferResult};
pub use reader::ByteReader;
pub use writer::{ByteWriter, U24_MAX};

/// Terminator of the newline-terminated strings used by config records.
pub const STRING_TERMINATOR: u8 = 0x0A;

/// Terminator of NUL-terminated strings.
pub const CSTRING_TERMINATOR: u8 = 0x00;
