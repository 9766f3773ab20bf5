//! Auto-growing binary buffer writer.

/// Writes big-endian integers and raw bytes into a growable buffer.
///
/// # Example
///
/// ```
/// use fil_codec_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8u16(0x19, 0x0400);
/// assert_eq!(writer.flush(), vec![0x19, 0x04, 0x00]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct Writer {
    data: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Discards everything written so far.
    pub fn reset(&mut self) {
        self.data.clear();
    }

    /// Takes the written bytes, leaving the writer empty.
    pub fn flush(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.data)
    }

    /// Borrows the written bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.data.push(val);
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.data.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.data.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.data.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a one-byte prefix followed by a big-endian `u8`.
    pub fn u8u8(&mut self, prefix: u8, val: u8) {
        self.u8(prefix);
        self.u8(val);
    }

    /// Writes a one-byte prefix followed by a big-endian `u16`.
    pub fn u8u16(&mut self, prefix: u8, val: u16) {
        self.u8(prefix);
        self.u16(val);
    }

    /// Writes a one-byte prefix followed by a big-endian `u32`.
    pub fn u8u32(&mut self, prefix: u8, val: u32) {
        self.u8(prefix);
        self.u32(val);
    }

    /// Writes a one-byte prefix followed by a big-endian `u64`.
    pub fn u8u64(&mut self, prefix: u8, val: u64) {
        self.u8(prefix);
        self.u64(val);
    }

    /// Appends raw bytes.
    pub fn buf(&mut self, data: &[u8]) {
        self.data.extend_from_slice(data);
    }
}
