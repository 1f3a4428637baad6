use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::FormatError;

pub const ALIGN: usize = 4;

/// Number of zero bytes needed to bring `len` up to the next 4-byte boundary.
pub const fn padding_for(len: usize) -> usize {
    (ALIGN - len % ALIGN) % ALIGN
}

pub const fn align_up(len: usize) -> usize {
    len + padding_for(len)
}

/// Size on disk of a length prefixed string holding `len` bytes of content.
pub const fn encoded_string_len(len: usize) -> usize {
    align_up(4 + len + 1)
}

/// Position tracked reader over a borrowed buffer.
///
/// Every read checks the remaining length up front so a short buffer is
/// reported as [`FormatError::Truncated`] with the offset it happened at,
/// never as a bare io error.
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor {
            inner: Cursor::new(data),
        }
    }

    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    /// The bytes consumed between `start` and the current position.
    pub fn span_since(&self, start: usize) -> &'a [u8] {
        let data: &'a [u8] = *self.inner.get_ref();
        &data[start.min(self.position())..self.position()]
    }

    fn truncated(&self, needed: usize) -> FormatError {
        FormatError::Truncated {
            offset: self.position(),
            needed,
            remaining: self.remaining(),
        }
    }

    fn ensure(&self, needed: usize) -> Result<(), FormatError> {
        if self.remaining() < needed {
            Err(self.truncated(needed))
        } else {
            Ok(())
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, FormatError> {
        self.ensure(1)?;
        self.inner.read_u8().map_err(|_| self.truncated(1))
    }

    pub fn read_i32(&mut self) -> Result<i32, FormatError> {
        self.ensure(4)?;
        self.inner
            .read_i32::<LittleEndian>()
            .map_err(|_| self.truncated(4))
    }

    pub fn read_u32(&mut self) -> Result<u32, FormatError> {
        self.ensure(4)?;
        self.inner
            .read_u32::<LittleEndian>()
            .map_err(|_| self.truncated(4))
    }

    pub fn read_i64(&mut self) -> Result<i64, FormatError> {
        self.ensure(8)?;
        self.inner
            .read_i64::<LittleEndian>()
            .map_err(|_| self.truncated(8))
    }

    pub fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], FormatError> {
        self.ensure(len)?;
        let start = self.position();
        let data: &'a [u8] = *self.inner.get_ref();
        self.inner.set_position((start + len) as u64);
        Ok(&data[start..start + len])
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], FormatError> {
        self.ensure(N)?;
        let mut out = [0u8; N];
        self.inner
            .read_exact(&mut out)
            .map_err(|_| self.truncated(N))?;
        Ok(out)
    }

    pub fn skip(&mut self, len: usize) -> Result<(), FormatError> {
        self.read_bytes(len).map(|_| ())
    }

    /// Consume the zero padding that follows `consumed` bytes of a record.
    pub fn skip_padding(&mut self, consumed: usize) -> Result<(), FormatError> {
        for _ in 0..padding_for(consumed) {
            let offset = self.position();
            if self.read_u8()? != 0 {
                return Err(FormatError::NonZeroPadding { offset });
            }
        }
        Ok(())
    }

    /// Read an i32 length, that many bytes, a `0x00` terminator and the zero
    /// padding up to the next 4-byte boundary. The returned slice excludes the
    /// terminator.
    pub fn read_length_prefixed_bytes(&mut self) -> Result<&'a [u8], FormatError> {
        let offset = self.position();
        let len = self.read_i32()?;
        if len < 0 {
            return Err(FormatError::StringLengthImplausible { len, offset });
        }
        let len = len as usize;

        let bytes = self.read_bytes(len)?;

        let term = self.position();
        if self.read_u8()? != 0 {
            return Err(FormatError::MissingTerminator { offset: term });
        }
        self.skip_padding(4 + len + 1)?;

        Ok(bytes)
    }

    pub fn read_length_prefixed_string(&mut self) -> Result<String, FormatError> {
        let offset = self.position();
        let bytes = self.read_length_prefixed_bytes()?;
        String::from_utf8(bytes.to_vec()).map_err(|_| FormatError::InvalidUtf8 { offset })
    }

    /// Skip over a length prefixed string without checking its content,
    /// terminator or padding.
    pub fn skip_length_prefixed(&mut self) -> Result<(), FormatError> {
        let offset = self.position();
        let len = self.read_i32()?;
        if len < 0 {
            return Err(FormatError::StringLengthImplausible { len, offset });
        }
        self.skip(encoded_string_len(len as usize) - 4)
    }
}

/// Append only writer, the mirror of [`ByteCursor`].
///
/// Writing into a `Vec` can not fail so none of these return a `Result`.
#[derive(Default)]
pub struct ByteWriter {
    inner: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        ByteWriter { inner: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ByteWriter {
            inner: Vec::with_capacity(capacity),
        }
    }

    pub fn position(&self) -> usize {
        self.inner.len()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.inner[..]
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.inner
    }

    pub fn write_u8(&mut self, value: u8) {
        self.inner.push(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.inner.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_u32(&mut self, value: u32) {
        self.inner.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.inner.extend_from_slice(&value.to_le_bytes());
    }

    pub fn write_bytes(&mut self, data: &[u8]) {
        self.inner.extend_from_slice(data);
    }

    pub fn write_padding(&mut self, consumed: usize) {
        let len = self.inner.len() + padding_for(consumed);
        self.inner.resize(len, 0);
    }

    /// Overwrite an i32 that was already written at `offset`.
    pub fn patch_i32(&mut self, offset: usize, value: i32) {
        self.inner[offset..offset + 4].clone_from_slice(&value.to_le_bytes());
    }

    /// Write `data` as a length prefixed string. The prefix, terminator and
    /// padding are always derived from `data` itself. Returns the number of
    /// bytes written.
    pub fn write_length_prefixed_bytes(&mut self, data: &[u8]) -> usize {
        // The format can not represent more than i32::MAX bytes of content
        let len = data.len() as i32;

        self.write_i32(len);
        self.write_bytes(data);
        self.write_u8(0x00);
        self.write_padding(4 + data.len() + 1);

        encoded_string_len(data.len())
    }

    pub fn write_length_prefixed_string(&mut self, value: &str) -> usize {
        self.write_length_prefixed_bytes(value.as_bytes())
    }
}

#[cfg(test)]
mod test_alignment {
    use super::*;

    #[test]
    fn padding() {
        assert_eq!(padding_for(0), 0);
        assert_eq!(padding_for(1), 3);
        assert_eq!(padding_for(3), 1);
        assert_eq!(padding_for(4), 0);
        assert_eq!(padding_for(9), 3);
    }

    #[test]
    fn string_len() {
        // 4 byte length + terminator always needs at least 8 bytes
        assert_eq!(encoded_string_len(0), 8);
        assert_eq!(encoded_string_len(2), 8);
        assert_eq!(encoded_string_len(3), 8);
        assert_eq!(encoded_string_len(4), 12);
        assert_eq!(encoded_string_len(16), 24);
    }
}


#[cfg(test)]
mod test_byte_writer {
    use super::*;

    #[test]
    fn write_ints() {
        let mut writer = ByteWriter::new();
        writer.write_i32(-1);
        writer.write_u32(12345);

        assert_eq!(writer.as_slice(), &[0xff, 0xff, 0xff, 0xff, 57, 48, 0, 0]);
    }

    #[test]
    fn patch_int() {
        let mut writer = ByteWriter::new();
        writer.write_bytes(&[0xaa; 12]);
        writer.patch_i32(4, 2);

        assert_eq!(
            writer.into_inner(),
            vec![0xaa, 0xaa, 0xaa, 0xaa, 2, 0, 0, 0, 0xaa, 0xaa, 0xaa, 0xaa]
        );
    }

    #[test]
    fn write_strings() {
        for (value, expect) in [
            ("", vec![0, 0, 0, 0, 0, 0, 0, 0]),
            ("ab", vec![2, 0, 0, 0, b'a', b'b', 0, 0]),
            ("abc", vec![3, 0, 0, 0, b'a', b'b', b'c', 0]),
            ("abcd", vec![4, 0, 0, 0, b'a', b'b', b'c', b'd', 0, 0, 0, 0]),
        ] {
            let mut writer = ByteWriter::new();
            let len = writer.write_length_prefixed_string(value);

            assert_eq!(len, expect.len());
            assert_eq!(len % ALIGN, 0);
            assert_eq!(writer.into_inner(), expect);
        }
    }

    #[test]
    fn written_strings_read_back() {
        let mut writer = ByteWriter::new();
        writer.write_length_prefixed_string("unity-text");
        writer.write_length_prefixed_string("é");
        let data = writer.into_inner();

        let mut cursor = ByteCursor::new(&data);
        assert_eq!(cursor.read_length_prefixed_string().unwrap(), "unity-text");
        assert_eq!(cursor.read_length_prefixed_string().unwrap(), "é");
        assert_eq!(cursor.remaining(), 0);
    }
}
