//! Archive container framing for the jagcfg cache codecs.
//!
//! This crate handles the outer container every config domain lives in:
//! the tri-byte header, the entry table, bzip2 block compression with a
//! stripped magic header, and name hashing for entry lookup. It does not
//! know what the entries contain.
//!
//! # Wire layout
//!
//! ```text
//! u24 extracted_len | u24 stored_len | payload (bzip2 when the lengths differ)
//! payload = u16 count | count x (i32 id, u24 extracted, u24 stored) | bodies
//! ```
//!
//! # Design Principles
//!
//! - **Bounded decoding** - Every length field is checked against the bytes present.
//! - **Immutable archives** - Entry edits return a new [`Archive`].
//! - **No domain knowledge** - This crate handles framing, not definitions.

mod compression;
mod container;
mod entry;
mod error;
mod hash;
mod options;
mod store;

pub use compression::{compress, decompress, Header, BZIP2_HEADER};
pub use container::{
    decode_archive, encode_archive, read_layout, ArchiveLayout, EntryLayout, ENTRY_ROW_SIZE,
    HEADER_SIZE,
};
pub use entry::{Archive, ArchiveEntry};
pub use error::{ArchiveError, ArchiveResult, DecompressionError, FramingError};
pub use hash::name_hash;
pub use options::{CompressionMode, DecodeOptions, EntryPolicy};
pub use store::{load_archive, ByteRangeProvider, MemoryStore, ARCHIVE_INDEX, CONFIG_ARCHIVE};
