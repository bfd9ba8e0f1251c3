//! In-memory archive model.

use std::collections::HashSet;

use bytes::Bytes;

use crate::error::{ArchiveError, ArchiveResult};
use crate::hash::name_hash;

/// One identified blob inside an [`Archive`].
///
/// The contents are immutable; clones share the same backing storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveEntry {
    id: i32,
    data: Bytes,
}

impl ArchiveEntry {
    /// Creates an entry with an explicit identifier.
    pub fn new(id: i32, data: impl Into<Bytes>) -> Self {
        Self {
            id,
            data: data.into(),
        }
    }

    /// Creates an entry addressed by the hash of `name`.
    pub fn named(name: &str, data: impl Into<Bytes>) -> Self {
        Self::new(name_hash(name), data)
    }

    #[must_use]
    pub const fn id(&self) -> i32 {
        self.id
    }

    /// Borrows the entry contents.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns a shared handle to the entry contents.
    #[must_use]
    pub fn data(&self) -> Bytes {
        self.data.clone()
    }

    /// Copies the entry contents into a new buffer.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        self.data.to_vec()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// An immutable set of uniquely identified entries.
///
/// Iteration follows insertion (or decode) order. Equality compares the
/// entry sets regardless of order.
#[derive(Debug, Clone, Default)]
pub struct Archive {
    entries: Vec<ArchiveEntry>,
}

impl Archive {
    /// Creates an archive with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates an archive after checking identifiers are unique.
    pub fn new(entries: impl IntoIterator<Item = ArchiveEntry>) -> ArchiveResult<Self> {
        let entries: Vec<ArchiveEntry> = entries.into_iter().collect();
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id) {
                return Err(ArchiveError::DuplicateEntry { id: entry.id });
            }
        }
        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn contains(&self, id: i32) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: i32) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    #[must_use]
    pub fn get_named(&self, name: &str) -> Option<&ArchiveEntry> {
        self.get(name_hash(name))
    }

    /// Looks up an entry, failing with [`ArchiveError::EntryNotFound`].
    pub fn entry(&self, id: i32) -> ArchiveResult<&ArchiveEntry> {
        self.get(id).ok_or(ArchiveError::EntryNotFound { id })
    }

    /// Looks up an entry by name, failing with [`ArchiveError::EntryNotFound`].
    pub fn entry_named(&self, name: &str) -> ArchiveResult<&ArchiveEntry> {
        self.entry(name_hash(name))
    }

    /// Returns a copy of this archive with `entry` added, replacing any entry
    /// with the same identifier in place.
    #[must_use]
    pub fn with_entry(&self, entry: ArchiveEntry) -> Self {
        let mut entries = self.entries.clone();
        match entries.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        Self { entries }
    }

    /// Returns a copy of this archive without the entry `id`.
    #[must_use]
    pub fn without(&self, id: i32) -> Self {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|entry| entry.id != id)
                .cloned()
                .collect(),
        }
    }

    fn sorted(&self) -> Vec<&ArchiveEntry> {
        let mut entries: Vec<&ArchiveEntry> = self.entries.iter().collect();
        entries.sort_by_key(|entry| entry.id);
        entries
    }
}

impl PartialEq for Archive {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.sorted() == other.sorted()
    }
}

impl Eq for Archive {}

impl<'a> IntoIterator for &'a Archive {
    type Item = &'a ArchiveEntry;
    type IntoIter = std::slice::Iter<'a, ArchiveEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
