//! Position-tracked reader over cache bytes.

use crate::error::{BufferError, BufferResult};
use crate::{CSTRING_TERMINATOR, STRING_TERMINATOR};

/// A big-endian byte reader for decoding cache data.
///
/// All read operations are bounds-checked and return errors on failure.
/// The reader never panics on malformed input.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Creates a new `ByteReader` from a byte slice.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Returns the number of bytes remaining to read.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Returns `true` if there are no more bytes to read.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Returns the current byte position.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread tail of the buffer without consuming it.
    #[must_use]
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.data.len())..]
    }

    /// Returns the next byte without consuming it.
    pub fn peek_u8(&self) -> BufferResult<u8> {
        self.ensure(1)?;
        Ok(self.data[self.pos])
    }

    /// Reads an unsigned byte.
    pub fn read_u8(&mut self) -> BufferResult<u8> {
        let [value] = self.read_array::<1>()?;
        Ok(value)
    }

    /// Reads a signed byte.
    pub fn read_i8(&mut self) -> BufferResult<i8> {
        Ok(self.read_u8()? as i8)
    }

    /// Reads an unsigned big-endian short.
    pub fn read_u16(&mut self) -> BufferResult<u16> {
        Ok(u16::from_be_bytes(self.read_array::<2>()?))
    }

    /// Reads a signed big-endian short.
    pub fn read_i16(&mut self) -> BufferResult<i16> {
        Ok(i16::from_be_bytes(self.read_array::<2>()?))
    }

    /// Reads an unsigned big-endian tri-byte.
    pub fn read_u24(&mut self) -> BufferResult<u32> {
        let [a, b, c] = self.read_array::<3>()?;
        Ok(u32::from_be_bytes([0, a, b, c]))
    }

    /// Reads an unsigned big-endian int.
    pub fn read_u32(&mut self) -> BufferResult<u32> {
        Ok(u32::from_be_bytes(self.read_array::<4>()?))
    }

    /// Reads a signed big-endian int.
    pub fn read_i32(&mut self) -> BufferResult<i32> {
        Ok(i32::from_be_bytes(self.read_array::<4>()?))
    }

    /// Reads an unsigned smart: one byte below `0x80`, otherwise a short
    /// biased by `32768`.
    pub fn read_smart(&mut self) -> BufferResult<i32> {
        if self.peek_u8()? < 0x80 {
            Ok(i32::from(self.read_u8()?))
        } else {
            Ok(i32::from(self.read_u16()?) - 32768)
        }
    }

    /// Reads a signed smart: one byte biased by `64` below `0x80`, otherwise
    /// a short biased by `49152`.
    pub fn read_signed_smart(&mut self) -> BufferResult<i32> {
        if self.peek_u8()? < 0x80 {
            Ok(i32::from(self.read_u8()?) - 64)
        } else {
            Ok(i32::from(self.read_u16()?) - 49152)
        }
    }

    /// Reads a large smart: an int with the high bit masked off when the
    /// first byte has its high bit set, otherwise an unsigned short.
    pub fn read_large_smart(&mut self) -> BufferResult<i32> {
        if self.peek_u8()? & 0x80 != 0 {
            Ok(self.read_i32()? & 0x7FFF_FFFF)
        } else {
            Ok(i32::from(self.read_u16()?))
        }
    }

    /// Reads a newline-terminated string. The terminator is consumed but not
    /// returned.
    pub fn read_string(&mut self) -> BufferResult<String> {
        self.read_terminated(STRING_TERMINATOR)
    }

    /// Reads a NUL-terminated string.
    pub fn read_cstring(&mut self) -> BufferResult<String> {
        self.read_terminated(CSTRING_TERMINATOR)
    }

    /// Reads `len` bytes as a borrowed slice.
    pub fn read_bytes(&mut self, len: usize) -> BufferResult<&'a [u8]> {
        self.ensure(len)?;
        let bytes = &self.data[self.pos..self.pos + len];
        self.pos += len;
        Ok(bytes)
    }

    /// Skips `len` bytes.
    pub fn skip(&mut self, len: usize) -> BufferResult<()> {
        self.read_bytes(len).map(|_| ())
    }

    fn read_terminated(&mut self, terminator: u8) -> BufferResult<String> {
        let rest = self.rest();
        let Some(end) = rest.iter().position(|&b| b == terminator) else {
            return Err(BufferError::UnterminatedString { terminator });
        };
        // Cache strings are one byte per character.
        let value = rest[..end].iter().map(|&b| char::from(b)).collect();
        self.pos += end + 1;
        Ok(value)
    }

    fn ensure(&self, bytes: usize) -> BufferResult<()> {
        let available = self.remaining();
        if bytes > available {
            return Err(BufferError::UnexpectedEof {
                requested: bytes,
                available,
            });
        }
        Ok(())
    }

    fn read_array<const N: usize>(&mut self) -> BufferResult<[u8; N]> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_reader() {
        let reader = ByteReader::new(&[]);
        assert!(reader.is_empty());
        assert_eq!(reader.remaining(), 0);
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_from_empty_fails() {
        let mut reader = ByteReader::new(&[]);
        let result = reader.read_u8();
        assert!(matches!(
            result,
            Err(BufferError::UnexpectedEof {
                requested: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn read_tribyte() {
        let mut reader = ByteReader::new(&[0x01, 0x00, 0x00]);
        assert_eq!(reader.read_u24().unwrap(), 65536);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_tribyte_has_no_sign_extension() {
        let mut reader = ByteReader::new(&[0xFF, 0xFF, 0xFF]);
        assert_eq!(reader.read_u24().unwrap(), 0x00FF_FFFF);
    }

    #[test]
    fn read_big_endian_widths() {
        let mut reader = ByteReader::new(&[0x12, 0x34, 0xFF, 0xFE, 0x12, 0x34, 0x56, 0x78]);
        assert_eq!(reader.read_u16().unwrap(), 0x1234);
        assert_eq!(reader.read_i16().unwrap(), -2);
        assert_eq!(reader.read_i32().unwrap(), 0x1234_5678);
    }

    #[test]
    fn read_smart_single_byte() {
        let mut reader = ByteReader::new(&[0x05]);
        assert_eq!(reader.read_smart().unwrap(), 5);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_smart_two_bytes() {
        let mut reader = ByteReader::new(&[0x80, 0x05]);
        assert_eq!(reader.read_smart().unwrap(), 32773 - 32768);
        assert!(reader.is_empty());
    }

    #[test]
    fn read_signed_smart_both_widths() {
        let mut reader = ByteReader::new(&[0x00, 0x40, 0xC0, 0x00, 0x80, 0x00]);
        assert_eq!(reader.read_signed_smart().unwrap(), -64);
        assert_eq!(reader.read_signed_smart().unwrap(), 0);
        assert_eq!(reader.read_signed_smart().unwrap(), 0);
        assert_eq!(reader.read_signed_smart().unwrap(), 32768 - 49152);
    }

    #[test]
    fn read_large_smart_both_widths() {
        let mut reader = ByteReader::new(&[0x7F, 0xFF, 0x80, 0x01, 0x00, 0x00]);
        assert_eq!(reader.read_large_smart().unwrap(), 32767);
        assert_eq!(reader.read_large_smart().unwrap(), 65536);
    }

    #[test]
    fn read_smart_truncated_second_byte() {
        let mut reader = ByteReader::new(&[0x80]);
        assert!(matches!(
            reader.read_smart(),
            Err(BufferError::UnexpectedEof { requested: 2, .. })
        ));
    }

    #[test]
    fn read_newline_string() {
        let mut reader = ByteReader::new(b"Door\nrest");
        assert_eq!(reader.read_string().unwrap(), "Door");
        assert_eq!(reader.rest(), b"rest");
    }

    #[test]
    fn read_string_is_latin1() {
        let mut reader = ByteReader::new(&[0xA3, b'5', 0x0A]);
        assert_eq!(reader.read_string().unwrap(), "\u{a3}5");
    }

    #[test]
    fn read_unterminated_string_fails() {
        let mut reader = ByteReader::new(b"Door");
        assert_eq!(
            reader.read_string().unwrap_err(),
            BufferError::UnterminatedString { terminator: 0x0A }
        );
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn read_cstring() {
        let mut reader = ByteReader::new(b"obj\0");
        assert_eq!(reader.read_cstring().unwrap(), "obj");
        assert!(reader.is_empty());
    }

    #[test]
    fn read_bytes_borrows() {
        let data = [1, 2, 3, 4];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_bytes(3).unwrap(), &[1, 2, 3]);
        assert!(reader.read_bytes(2).is_err());
        reader.skip(1).unwrap();
        assert!(reader.is_empty());
    }
}
