//! Record tables: how a domain's records are laid out in archive entries.

use archive::{Archive, ArchiveEntry};
use buffer::{ByteReader, ByteWriter};
use schema::{ConfigPropertyMap, DomainSchema};
use tracing::{debug, trace};

use crate::error::{CodecError, CodecResult};
use crate::record::{decode_properties, decode_record};

/// Largest record an index entry can describe.
pub const MAX_RECORD_LEN: usize = u16::MAX as usize;

/// Largest number of records a table can hold.
pub const MAX_RECORDS: usize = u16::MAX as usize;

/// How a domain's records are split across archive entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordLayout {
    /// `<domain>.idx` holds a u16 count and a u16 length per record;
    /// `<domain>.dat` holds the records back to back.
    #[default]
    Indexed,
    /// `<domain>.dat` holds a u16 count and the records back to back, split
    /// by their terminators.
    Counted,
}

impl RecordLayout {
    /// Names of the archive entries this layout uses for `domain`.
    #[must_use]
    pub fn entry_names(self, domain: &str) -> Vec<String> {
        match self {
            Self::Indexed => vec![data_name(domain), index_name(domain)],
            Self::Counted => vec![data_name(domain)],
        }
    }
}

fn data_name(domain: &str) -> String {
    format!("{domain}.dat")
}

fn index_name(domain: &str) -> String {
    format!("{domain}.idx")
}

/// Splits an indexed data buffer into per-record slices.
pub fn split_indexed<'a>(
    domain: &'static str,
    index: &[u8],
    data: &'a [u8],
) -> CodecResult<Vec<&'a [u8]>> {
    let mut reader = ByteReader::new(index);
    let count = reader
        .read_u16()
        .map_err(|_| CodecError::malformed(domain, "index is missing its record count"))?;
    let count = usize::from(count);
    if reader.remaining() != count * 2 {
        return Err(CodecError::malformed(
            domain,
            format!(
                "index declares {count} records but holds {} length bytes",
                reader.remaining()
            ),
        ));
    }

    let mut records = Vec::with_capacity(count);
    let mut offset = 0usize;
    for id in 0..count {
        let len = usize::from(
            reader
                .read_u16()
                .map_err(|_| CodecError::malformed(domain, "index ended early"))?,
        );
        let end = offset + len;
        if end > data.len() {
            return Err(CodecError::malformed(
                domain,
                format!(
                    "record {id} spans {offset}..{end} past {} data bytes",
                    data.len()
                ),
            ));
        }
        records.push(&data[offset..end]);
        offset = end;
    }

    if offset != data.len() {
        return Err(CodecError::malformed(
            domain,
            format!("{} data bytes follow the last record", data.len() - offset),
        ));
    }
    Ok(records)
}

/// Builds the index and data buffers for encoded records in id order.
pub fn join_indexed(domain: &'static str, records: &[Vec<u8>]) -> CodecResult<(Vec<u8>, Vec<u8>)> {
    let count = record_count(domain, records.len())?;
    let mut index = ByteWriter::with_capacity(2 + records.len() * 2);
    index.write_u16(count);

    let mut data = ByteWriter::with_capacity(records.iter().map(Vec::len).sum());
    for (id, record) in records.iter().enumerate() {
        let len = u16::try_from(record.len()).map_err(|_| CodecError::RecordTooLarge {
            domain,
            id: id as i32,
            len: record.len(),
            max: MAX_RECORD_LEN,
        })?;
        index.write_u16(len);
        data.write_bytes(record);
    }
    Ok((index.finish(), data.finish()))
}

/// Decodes a counted data buffer into property maps in id order.
pub fn decode_counted(schema: &DomainSchema, data: &[u8]) -> CodecResult<Vec<ConfigPropertyMap>> {
    let domain = schema.name();
    let mut reader = ByteReader::new(data);
    let count = reader
        .read_u16()
        .map_err(|_| CodecError::malformed(domain, "data is missing its record count"))?;

    let mut records = Vec::with_capacity(usize::from(count));
    for id in 0..i32::from(count) {
        let mut properties = schema.instantiate();
        decode_properties(domain, id, &mut reader, &mut properties)?;
        trace!(domain, id, "decoded record");
        records.push(properties);
    }

    if !reader.is_empty() {
        return Err(CodecError::malformed(
            domain,
            format!("{} bytes follow the last record", reader.remaining()),
        ));
    }
    Ok(records)
}

/// Builds a counted data buffer for encoded records in id order.
pub fn join_counted(domain: &'static str, records: &[Vec<u8>]) -> CodecResult<Vec<u8>> {
    let count = record_count(domain, records.len())?;
    let mut data = ByteWriter::with_capacity(2 + records.iter().map(Vec::len).sum::<usize>());
    data.write_u16(count);
    for record in records {
        data.write_bytes(record);
    }
    Ok(data.finish())
}

/// Reads and decodes every record of a domain from its archive entries.
pub fn read_tables(
    archive: &Archive,
    schema: &DomainSchema,
    layout: RecordLayout,
) -> CodecResult<Vec<ConfigPropertyMap>> {
    let domain = schema.name();
    let data = archive.entry_named(&data_name(domain))?;

    let records = match layout {
        RecordLayout::Indexed => {
            let index = archive.entry_named(&index_name(domain))?;
            split_indexed(domain, index.bytes(), data.bytes())?
                .into_iter()
                .enumerate()
                .map(|(id, bytes)| decode_record(schema, id as i32, bytes))
                .collect::<CodecResult<Vec<_>>>()?
        }
        RecordLayout::Counted => decode_counted(schema, data.bytes())?,
    };

    debug!(domain, ?layout, records = records.len(), "read record table");
    Ok(records)
}

/// Lays out encoded records as the archive entries of `layout`.
pub fn write_tables(
    domain: &'static str,
    layout: RecordLayout,
    records: &[Vec<u8>],
) -> CodecResult<Vec<ArchiveEntry>> {
    let entries = match layout {
        RecordLayout::Indexed => {
            let (index, data) = join_indexed(domain, records)?;
            vec![
                ArchiveEntry::named(&data_name(domain), data),
                ArchiveEntry::named(&index_name(domain), index),
            ]
        }
        RecordLayout::Counted => vec![ArchiveEntry::named(
            &data_name(domain),
            join_counted(domain, records)?,
        )],
    };

    debug!(domain, ?layout, records = records.len(), "wrote record table");
    Ok(entries)
}

fn record_count(domain: &'static str, count: usize) -> CodecResult<u16> {
    u16::try_from(count).map_err(|_| {
        CodecError::malformed(domain, format!("{count} records exceed the limit of {MAX_RECORDS}"))
    })
}
