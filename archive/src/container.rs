//! Archive container decoding and encoding.

use std::borrow::Cow;

use buffer::{BufferError, ByteReader, ByteWriter};
use tracing::{debug, trace};

use crate::compression::{self, Header, BZIP2_HEADER};
use crate::entry::{Archive, ArchiveEntry};
use crate::error::{ArchiveResult, FramingError};
use crate::options::{CompressionMode, DecodeOptions};

/// Size of the container header (two tri-bytes).
pub const HEADER_SIZE: usize = 3 + 3;

/// Size of one entry table row (`i32` id and two tri-byte lengths).
pub const ENTRY_ROW_SIZE: usize = 4 + 3 + 3;

const STRIPPED: Header = Header::Stripped(BZIP2_HEADER);

/// Header and entry table of an archive, without entry bodies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// Length of the payload once decompressed.
    pub extracted_len: usize,
    /// Length of the payload as stored after the header.
    pub stored_len: usize,
    /// Whether the payload is compressed as one block.
    pub whole_compressed: bool,
    pub entries: Vec<EntryLayout>,
}

/// One row of the entry table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLayout {
    pub id: i32,
    pub extracted_len: usize,
    pub stored_len: usize,
}

impl ArchiveLayout {
    /// Length of the entry table at the start of the payload.
    #[must_use]
    pub fn table_len(&self) -> usize {
        2 + self.entries.len() * ENTRY_ROW_SIZE
    }
}

/// Reads the header and entry table, returning them with the payload
/// (decompressed when the whole archive is compressed).
pub fn read_layout(bytes: &[u8]) -> ArchiveResult<(ArchiveLayout, Cow<'_, [u8]>)> {
    if bytes.is_empty() {
        return Ok((ArchiveLayout::default(), Cow::Borrowed(bytes)));
    }

    let mut reader = ByteReader::new(bytes);
    let extracted_len = reader.read_u24().map_err(truncated("header"))? as usize;
    let stored_len = reader.read_u24().map_err(truncated("header"))? as usize;
    let body = reader
        .read_bytes(stored_len)
        .map_err(truncated("payload"))?;
    if !reader.is_empty() {
        trace!(trailing = reader.remaining(), "ignoring bytes after archive payload");
    }

    let whole_compressed = stored_len != extracted_len;
    let payload = if whole_compressed {
        Cow::Owned(compression::decompress(body, extracted_len, STRIPPED)?)
    } else {
        Cow::Borrowed(body)
    };

    let mut table = ByteReader::new(&payload);
    let count = table.read_u16().map_err(truncated("entry table"))?;
    let mut entries = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        let id = table.read_i32().map_err(truncated("entry table"))?;
        let entry_extracted = table.read_u24().map_err(truncated("entry table"))? as usize;
        let entry_stored = table.read_u24().map_err(truncated("entry table"))? as usize;
        entries.push(EntryLayout {
            id,
            extracted_len: entry_extracted,
            stored_len: entry_stored,
        });
    }

    let layout = ArchiveLayout {
        extracted_len,
        stored_len,
        whole_compressed,
        entries,
    };
    Ok((layout, payload))
}

/// Decodes an archive.
///
/// An empty input decodes to an empty archive.
pub fn decode_archive(bytes: &[u8], options: &DecodeOptions) -> ArchiveResult<Archive> {
    if bytes.is_empty() {
        return Ok(Archive::empty());
    }

    let (layout, payload) = read_layout(bytes)?;
    let mut reader = ByteReader::new(&payload);
    reader
        .skip(layout.table_len())
        .map_err(truncated("entry table"))?;

    let mut entries = Vec::with_capacity(layout.entries.len());
    for row in &layout.entries {
        let data = if layout.whole_compressed {
            reader
                .read_bytes(row.extracted_len)
                .map_err(truncated("entry body"))?
                .to_vec()
        } else if options
            .entry_policy
            .should_decompress(row.extracted_len, row.stored_len)
        {
            let stored = reader
                .read_bytes(row.stored_len)
                .map_err(truncated("entry body"))?;
            compression::decompress(stored, row.extracted_len, STRIPPED)?
        } else {
            reader
                .read_bytes(row.stored_len)
                .map_err(truncated("entry body"))?
                .to_vec()
        };
        trace!(
            id = row.id,
            extracted = row.extracted_len,
            stored = row.stored_len,
            "decoded archive entry"
        );
        entries.push(ArchiveEntry::new(row.id, data));
    }

    debug!(
        entries = entries.len(),
        whole_compressed = layout.whole_compressed,
        "decoded archive"
    );
    Archive::new(entries)
}

/// Encodes an archive with the given compression mode.
///
/// The stored-size column holds the compressed entry length for
/// [`CompressionMode::PerEntry`] and [`CompressionMode::Whole`] and the raw
/// length for [`CompressionMode::None`].
///
/// A compressed block whose length equals its raw length fails with
/// [`FramingError::AmbiguousCompression`]: the whole-payload header and the
/// size-aware entry policy both read equal lengths as uncompressed.
pub fn encode_archive(archive: &Archive, mode: CompressionMode) -> ArchiveResult<Vec<u8>> {
    let count = u16::try_from(archive.len())
        .map_err(|_| FramingError::TooManyEntries {
            count: archive.len(),
        })?;

    let packed: Vec<Option<Vec<u8>>> = archive
        .iter()
        .map(|entry| match mode {
            CompressionMode::None => Ok(None),
            CompressionMode::PerEntry | CompressionMode::Whole => {
                compression::compress(entry.bytes(), STRIPPED).map(Some)
            }
        })
        .collect::<ArchiveResult<_>>()?;

    let mut meta = ByteWriter::with_capacity(2 + archive.len() * ENTRY_ROW_SIZE);
    meta.write_u16(count);
    for (entry, packed) in archive.iter().zip(&packed) {
        let stored_len = match packed {
            Some(packed) if mode == CompressionMode::PerEntry => {
                distinct_compressed_len("entry", entry.len(), packed.len())?
            }
            Some(packed) => packed.len(),
            None => entry.len(),
        };
        meta.write_i32(entry.id());
        write_length(&mut meta, "entry extracted size", entry.len())?;
        write_length(&mut meta, "entry stored size", stored_len)?;
    }

    let mut payload = meta.finish();
    for (entry, packed) in archive.iter().zip(&packed) {
        match (mode, packed) {
            (CompressionMode::PerEntry, Some(packed)) => payload.extend_from_slice(packed),
            _ => payload.extend_from_slice(entry.bytes()),
        }
    }

    let whole = if mode == CompressionMode::Whole {
        Some(compression::compress(&payload, STRIPPED)?)
    } else {
        None
    };
    let stored = whole.as_deref().unwrap_or(&payload);
    if whole.is_some() {
        distinct_compressed_len("payload", payload.len(), stored.len())?;
    }

    let mut out = ByteWriter::with_capacity(HEADER_SIZE + stored.len());
    write_length(&mut out, "payload extracted size", payload.len())?;
    write_length(&mut out, "payload stored size", stored.len())?;
    out.write_bytes(stored);

    debug!(
        entries = archive.len(),
        ?mode,
        extracted = payload.len(),
        stored = stored.len(),
        "encoded archive"
    );
    Ok(out.finish())
}

impl Archive {
    /// Decodes an archive with [`DecodeOptions::default`].
    pub fn decode(bytes: &[u8]) -> ArchiveResult<Self> {
        decode_archive(bytes, &DecodeOptions::default())
    }

    /// Encodes this archive with the given compression mode.
    pub fn encode(&self, mode: CompressionMode) -> ArchiveResult<Vec<u8>> {
        encode_archive(self, mode)
    }
}

fn distinct_compressed_len(
    field: &'static str,
    raw_len: usize,
    compressed_len: usize,
) -> ArchiveResult<usize> {
    if compressed_len == raw_len {
        return Err(FramingError::AmbiguousCompression {
            field,
            length: raw_len,
        }
        .into());
    }
    Ok(compressed_len)
}

fn write_length(writer: &mut ByteWriter, field: &'static str, length: usize) -> ArchiveResult<()> {
    let value = u32::try_from(length).map_err(|_| FramingError::LengthOverflow { field, length })?;
    writer
        .write_u24(value)
        .map_err(|_| FramingError::LengthOverflow { field, length })?;
    Ok(())
}

fn truncated(section: &'static str) -> impl Fn(BufferError) -> FramingError {
    move |err| match err {
        BufferError::UnexpectedEof {
            requested,
            available,
        } => FramingError::Truncated {
            section,
            needed: requested,
            available,
        },
        _ => FramingError::Truncated {
            section,
            needed: 0,
            available: 0,
        },
    }
}
