//! Whole-block bzip2 compression.

use std::io::{Read, Write};

use bzip2::read::BzDecoder;
use bzip2::write::BzEncoder;
use bzip2::Compression;

use crate::error::{ArchiveError, ArchiveResult, DecompressionError};

/// Magic header the archive strips from every compressed block.
pub const BZIP2_HEADER: &[u8] = b"BZh1";

/// How the magic header of a compressed block is stored on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Header {
    /// The block carries the algorithm's own magic header.
    Native,
    /// The given constant header is stripped on compress and re-prepended on
    /// decompress.
    Stripped(&'static [u8]),
}

impl Header {
    fn prefix(self) -> &'static [u8] {
        match self {
            Self::Native => &[],
            Self::Stripped(prefix) => prefix,
        }
    }
}

/// Compresses `data` as one block.
pub fn compress(data: &[u8], header: Header) -> ArchiveResult<Vec<u8>> {
    let mut encoder = BzEncoder::new(Vec::new(), Compression::fast());
    encoder
        .write_all(data)
        .map_err(|err| ArchiveError::Compression {
            reason: err.to_string(),
        })?;
    let mut out = encoder.finish().map_err(|err| ArchiveError::Compression {
        reason: err.to_string(),
    })?;

    let prefix = header.prefix();
    if !out.starts_with(prefix) {
        return Err(ArchiveError::Compression {
            reason: format!("stream does not start with header {prefix:?}"),
        });
    }
    out.drain(..prefix.len());
    Ok(out)
}

/// Decompresses one block that must inflate to exactly `expected_len` bytes.
pub fn decompress(data: &[u8], expected_len: usize, header: Header) -> ArchiveResult<Vec<u8>> {
    let stream = header.prefix().chain(data);
    // One extra byte so an oversized stream is detected without inflating all of it.
    let mut decoder = BzDecoder::new(stream).take(expected_len as u64 + 1);
    let mut out = Vec::with_capacity(expected_len);
    decoder
        .read_to_end(&mut out)
        .map_err(|err| DecompressionError::Corrupt {
            reason: err.to_string(),
        })?;

    if out.len() != expected_len {
        return Err(DecompressionError::LengthMismatch {
            expected: expected_len,
            actual: out.len(),
        }
        .into());
    }
    Ok(out)
}
