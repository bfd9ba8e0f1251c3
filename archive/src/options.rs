//! Decode and encode options for the archive container.

/// How the body of an archive is compressed on encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CompressionMode {
    /// Entries are stored raw and the payload is not compressed.
    None,
    /// Every entry is compressed on its own.
    #[default]
    PerEntry,
    /// Entries are stored raw and the whole payload is compressed as one block.
    Whole,
}

/// Per-entry decompression policy for archives whose payload is not
/// compressed as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryPolicy {
    /// Decompress every entry, even when its stored size equals its extracted
    /// size.
    #[default]
    AlwaysDecompress,
    /// Decompress an entry only when its stored size differs from its
    /// extracted size; otherwise take its bytes as-is.
    WhenSizesDiffer,
}

impl EntryPolicy {
    /// Whether an entry with these table lengths is inflated on decode.
    #[must_use]
    pub const fn should_decompress(self, extracted_len: usize, stored_len: usize) -> bool {
        match self {
            Self::AlwaysDecompress => true,
            Self::WhenSizesDiffer => extracted_len != stored_len,
        }
    }
}

/// Options applied while decoding an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Per-entry decompression policy.
    pub entry_policy: EntryPolicy,
}

impl DecodeOptions {
    /// Options that decompress every per-entry body unconditionally.
    #[must_use]
    pub const fn literal() -> Self {
        Self {
            entry_policy: EntryPolicy::AlwaysDecompress,
        }
    }

    /// Options that only decompress entries whose sizes differ.
    #[must_use]
    pub const fn size_aware() -> Self {
        Self {
            entry_policy: EntryPolicy::WhenSizesDiffer,
        }
    }
}
