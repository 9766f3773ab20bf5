//! Binary buffer reader with cursor tracking.

use std::str;

use crate::BufferError;

/// A binary buffer reader over a borrowed byte slice.
///
/// The reader keeps a cursor `pos` and an exclusive `end`. Every read checks the
/// remaining length first; a short buffer leaves the cursor untouched and
/// returns [`BufferError::EndOfBuffer`].
///
/// # Example
///
/// ```
/// use fil_codec_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u16().unwrap(), 0x0203);
/// assert_eq!(reader.size(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub data: &'a [u8],
    /// Current cursor position.
    pub pos: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(data: &'a [u8]) -> Self {
        let end = data.len();
        Self { data, pos: 0, end }
    }

    /// Resets the reader with a new byte slice.
    pub fn reset(&mut self, data: &'a [u8]) {
        self.pos = 0;
        self.end = data.len();
        self.data = data;
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.pos)
    }

    /// Returns `true` once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Number of bytes consumed since the start of the slice.
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn ensure(&self, needed: usize) -> Result<(), BufferError> {
        let remaining = self.size();
        if needed > remaining {
            return Err(BufferError::EndOfBuffer { needed, remaining });
        }
        Ok(())
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.ensure(1)?;
        Ok(self.data[self.pos])
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        self.ensure(length)?;
        self.pos += length;
        Ok(())
    }

    /// Returns a subarray of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.ensure(size)?;
        let pos = self.pos;
        let end = pos + size;
        self.pos = end;
        Ok(&self.data[pos..end])
    }

    /// Returns the unread part of the buffer without advancing the cursor.
    pub fn rest(&self) -> &'a [u8] {
        &self.data[self.pos.min(self.end)..self.end]
    }

    /// Reads an unsigned 8-bit integer.
    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.ensure(1)?;
        let val = self.data[self.pos];
        self.pos += 1;
        Ok(val)
    }

    /// Reads an unsigned 16-bit integer (big-endian).
    #[inline]
    pub fn u16(&mut self) -> Result<u16, BufferError> {
        Ok(u16::from_be_bytes(self.array::<2>()?))
    }

    /// Reads an unsigned 32-bit integer (big-endian).
    #[inline]
    pub fn u32(&mut self) -> Result<u32, BufferError> {
        Ok(u32::from_be_bytes(self.array::<4>()?))
    }

    /// Reads an unsigned 64-bit integer (big-endian).
    #[inline]
    pub fn u64(&mut self) -> Result<u64, BufferError> {
        Ok(u64::from_be_bytes(self.array::<8>()?))
    }

    /// Reads exactly `N` bytes into a fixed-size array.
    pub fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        let bytes = self.buf(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(bytes);
        Ok(out)
    }

    /// Reads a UTF-8 string of the given byte size.
    ///
    /// The returned `&str` borrows the input bytes unchanged.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        self.ensure(size)?;
        let start = self.pos;
        let s = str::from_utf8(&self.data[start..start + size])
            .map_err(|_| BufferError::InvalidUtf8)?;
        self.pos += size;
        Ok(s)
    }
}
