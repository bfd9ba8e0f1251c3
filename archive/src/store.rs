//! Byte-range providers that hand raw archives to the codec.

use std::collections::HashMap;

use bytes::Bytes;

use crate::container::decode_archive;
use crate::entry::Archive;
use crate::error::{ArchiveError, ArchiveResult};
use crate::options::DecodeOptions;

/// Index of the legacy cache that holds the archives.
pub const ARCHIVE_INDEX: u8 = 0;

/// File id of the config archive within [`ARCHIVE_INDEX`].
pub const CONFIG_ARCHIVE: u32 = 2;

/// Source of raw, already-decrypted file bytes addressed by `(index, file)`.
pub trait ByteRangeProvider {
    /// Returns the bytes of one file, or [`ArchiveError::FileNotFound`].
    fn fetch(&self, index: u8, file: u32) -> ArchiveResult<Bytes>;
}

/// A [`ByteRangeProvider`] backed by a map of in-memory files.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: HashMap<(u8, u32), Bytes>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` at `(index, file)`, returning the previous contents.
    pub fn insert(&mut self, index: u8, file: u32, data: impl Into<Bytes>) -> Option<Bytes> {
        self.files.insert((index, file), data.into())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ByteRangeProvider for MemoryStore {
    fn fetch(&self, index: u8, file: u32) -> ArchiveResult<Bytes> {
        self.files
            .get(&(index, file))
            .cloned()
            .ok_or(ArchiveError::FileNotFound { index, file })
    }
}

/// Fetches and decodes the archive stored at `(index, file)`.
pub fn load_archive<P>(
    provider: &P,
    index: u8,
    file: u32,
    options: &DecodeOptions,
) -> ArchiveResult<Archive>
where
    P: ByteRangeProvider + ?Sized,
{
    let bytes = provider.fetch(index, file)?;
    decode_archive(&bytes, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::ArchiveEntry;
    use crate::options::CompressionMode;

    #[test]
    fn missing_file_is_reported() {
        let store = MemoryStore::new();
        let err = store.fetch(ARCHIVE_INDEX, CONFIG_ARCHIVE).unwrap_err();
        assert_eq!(err, ArchiveError::FileNotFound { index: 0, file: 2 });
    }

    #[test]
    fn load_archive_decodes_stored_bytes() {
        let archive = Archive::new([ArchiveEntry::named("varp.dat", vec![0, 0])]).unwrap();
        let mut store = MemoryStore::new();
        store.insert(
            ARCHIVE_INDEX,
            CONFIG_ARCHIVE,
            archive.encode(CompressionMode::Whole).unwrap(),
        );

        let loaded = load_archive(
            &store,
            ARCHIVE_INDEX,
            CONFIG_ARCHIVE,
            &DecodeOptions::default(),
        )
        .unwrap();
        assert_eq!(loaded, archive);
    }

    #[test]
    fn provider_is_object_safe() {
        let store = MemoryStore::new();
        let provider: &dyn ByteRangeProvider = &store;
        assert!(load_archive(provider, 0, 0, &DecodeOptions::default()).is_err());
    }
}
