//! Growable writer for encoding cache bytes.

use crate::error::{BufferError, BufferResult};
use crate::{CSTRING_TERMINATOR, STRING_TERMINATOR};

/// Largest value a tri-byte can hold.
pub const U24_MAX: u32 = 0x00FF_FFFF;

/// A big-endian byte writer.
///
/// Writes are accumulated in an internal buffer. Call [`finish`](Self::finish)
/// to get the final byte buffer.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    bytes: Vec<u8>,
}

impl ByteWriter {
    /// Creates a new empty `ByteWriter`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new `ByteWriter` with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(bytes),
        }
    }

    /// Returns the number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn write_u8(&mut self, value: u8) {
        self.bytes.push(value);
    }

    pub fn write_i8(&mut self, value: i8) {
        self.bytes.push(value as u8);
    }

    pub fn write_u16(&mut self, value: u16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i16(&mut self, value: i16) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes an unsigned tri-byte.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::ValueOutOfRange`] if `value` exceeds [`U24_MAX`].
    pub fn write_u24(&mut self, value: u32) -> BufferResult<()> {
        if value > U24_MAX {
            return Err(BufferError::ValueOutOfRange {
                value: i64::from(value),
                encoding: "tribyte",
            });
        }
        self.bytes.extend_from_slice(&value.to_be_bytes()[1..]);
        Ok(())
    }

    pub fn write_u32(&mut self, value: u32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.bytes.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes an unsigned smart (`0..32768`).
    pub fn write_smart(&mut self, value: i32) -> BufferResult<()> {
        match value {
            0..=0x7F => self.write_u8(value as u8),
            0x80..=0x7FFF => self.write_u16((value + 32768) as u16),
            _ => {
                return Err(BufferError::ValueOutOfRange {
                    value: i64::from(value),
                    encoding: "smart",
                })
            }
        }
        Ok(())
    }

    /// Writes a signed smart (`-16384..16384`).
    pub fn write_signed_smart(&mut self, value: i32) -> BufferResult<()> {
        match value {
            -64..=63 => self.write_u8((value + 64) as u8),
            -16384..=16383 => self.write_u16((value + 49152) as u16),
            _ => {
                return Err(BufferError::ValueOutOfRange {
                    value: i64::from(value),
                    encoding: "signed smart",
                })
            }
        }
        Ok(())
    }

    /// Writes a large smart (`0..=i32::MAX`).
    pub fn write_large_smart(&mut self, value: i32) -> BufferResult<()> {
        match value {
            0..=0x7FFF => self.write_u16(value as u16),
            0x8000..=i32::MAX => self.write_u32(value as u32 | 0x8000_0000),
            _ => {
                return Err(BufferError::ValueOutOfRange {
                    value: i64::from(value),
                    encoding: "large smart",
                })
            }
        }
        Ok(())
    }

    /// Writes a newline-terminated string.
    pub fn write_string(&mut self, value: &str) -> BufferResult<()> {
        self.write_terminated(value, STRING_TERMINATOR)
    }

    /// Writes a NUL-terminated string.
    pub fn write_cstring(&mut self, value: &str) -> BufferResult<()> {
        self.write_terminated(value, CSTRING_TERMINATOR)
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    /// Finishes writing and returns the byte buffer.
    #[must_use]
    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    /// Finishes writing and appends to the provided buffer.
    pub fn finish_into(mut self, buf: &mut Vec<u8>) {
        buf.append(&mut self.bytes);
    }

    fn write_terminated(&mut self, value: &str, terminator: u8) -> BufferResult<()> {
        let start = self.bytes.len();
        for ch in value.chars() {
            match u8::try_from(u32::from(ch)) {
                Ok(byte) if byte != terminator => self.bytes.push(byte),
                _ => {
                    self.bytes.truncate(start);
                    return Err(BufferError::UnmappableChar { found: ch });
                }
            }
        }
        self.bytes.push(terminator);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_writer() {
        let writer = ByteWriter::new();
        assert!(writer.is_empty());
        assert!(writer.finish().is_empty());
    }

    #[test]
    fn write_tribyte() {
        let mut writer = ByteWriter::new();
        writer.write_u24(65536).unwrap();
        assert_eq!(writer.finish(), vec![0x01, 0x00, 0x00]);
    }

    #[test]
    fn write_tribyte_out_of_range() {
        let mut writer = ByteWriter::new();
        let err = writer.write_u24(U24_MAX + 1).unwrap_err();
        assert!(matches!(
            err,
            BufferError::ValueOutOfRange {
                encoding: "tribyte",
                ..
            }
        ));
        assert!(writer.is_empty());
    }

    #[test]
    fn write_big_endian_widths() {
        let mut writer = ByteWriter::new();
        writer.write_u16(0x1234);
        writer.write_i16(-2);
        writer.write_i32(0x1234_5678);
        writer.write_i8(-1);
        assert_eq!(
            writer.finish(),
            vec![0x12, 0x34, 0xFF, 0xFE, 0x12, 0x34, 0x56, 0x78, 0xFF]
        );
    }

    #[test]
    fn write_smart_picks_width() {
        let mut writer = ByteWriter::new();
        writer.write_smart(5).unwrap();
        writer.write_smart(127).unwrap();
        writer.write_smart(128).unwrap();
        assert_eq!(writer.finish(), vec![0x05, 0x7F, 0x80, 0x80]);
    }

    #[test]
    fn write_smart_rejects_out_of_range() {
        let mut writer = ByteWriter::new();
        assert!(writer.write_smart(-1).is_err());
        assert!(writer.write_smart(32768).is_err());
    }

    #[test]
    fn write_signed_smart_picks_width() {
        let mut writer = ByteWriter::new();
        writer.write_signed_smart(-64).unwrap();
        writer.write_signed_smart(64).unwrap();
        assert_eq!(writer.finish(), vec![0x00, 0xC0, 0x40]);
    }

    #[test]
    fn write_large_smart_picks_width() {
        let mut writer = ByteWriter::new();
        writer.write_large_smart(32767).unwrap();
        writer.write_large_smart(65536).unwrap();
        assert_eq!(writer.finish(), vec![0x7F, 0xFF, 0x80, 0x01, 0x00, 0x00]);
        assert!(ByteWriter::new().write_large_smart(-1).is_err());
    }

    #[test]
    fn write_newline_string() {
        let mut writer = ByteWriter::new();
        writer.write_string("Door").unwrap();
        assert_eq!(writer.finish(), b"Door\n".to_vec());
    }

    #[test]
    fn write_string_rejects_wide_chars() {
        let mut writer = ByteWriter::new();
        writer.write_u8(7);
        let err = writer.write_string("a\u{20ac}").unwrap_err();
        assert_eq!(err, BufferError::UnmappableChar { found: '\u{20ac}' });
        assert_eq!(writer.finish(), vec![7]);
    }

    #[test]
    fn write_string_rejects_embedded_terminator() {
        let mut writer = ByteWriter::new();
        assert!(writer.write_string("a\nb").is_err());
        assert!(writer.write_cstring("a\nb").is_ok());
    }

    #[test]
    fn finish_into() {
        let mut writer = ByteWriter::new();
        writer.write_u8(0xAB);

        let mut buf = vec![0x00, 0x11];
        writer.finish_into(&mut buf);
        assert_eq!(buf, vec![0x00, 0x11, 0xAB]);
    }
}
