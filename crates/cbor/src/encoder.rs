//! `CborEncoder`: minimal-length CBOR encoder for the supported subset.

use fil_codec_bigint::BigIntValue;
use fil_codec_buffers::Writer;

use crate::constants::*;
use crate::CborValue;

/// Encoder producing canonical (shortest-header) CBOR.
///
/// Used to build actor call parameters; anything [`crate::CborReader`]
/// accepts can be written back, plus tags for CIDs.
pub struct CborEncoder {
    pub writer: Writer,
}

impl Default for CborEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CborEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn with_writer(writer: Writer) -> Self {
        Self { writer }
    }

    /// Encode a value and return the CBOR bytes.
    pub fn encode(&mut self, value: &CborValue) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    /// Takes everything written since the last flush.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &CborValue) {
        match value {
            CborValue::UnsignedInt(u) => self.write_u_integer(*u),
            CborValue::NegativeInt(n) => self.write_head(OVERLAY_NIN, *n),
            CborValue::Bool(b) => self.write_boolean(*b),
            CborValue::Null => self.write_null(),
            CborValue::ByteString(b) => self.write_bin(b),
            CborValue::TextString(s) => self.write_str(s),
            CborValue::FixedArray(items) => {
                self.write_arr_hdr(items.len());
                for item in items {
                    self.write_any(item);
                }
            }
            CborValue::Map(entries) => {
                self.write_map_hdr(entries.len());
                for (key, value) in entries {
                    self.write_any(key);
                    self.write_any(value);
                }
            }
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(CBOR_NULL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { CBOR_TRUE } else { CBOR_FALSE });
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        self.write_head(OVERLAY_UIN, uint);
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_head(OVERLAY_UIN, int as u64);
        } else {
            self.write_head(OVERLAY_NIN, (-1i64).wrapping_sub(int) as u64);
        }
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.write_head(OVERLAY_BIN, buf.len() as u64);
        self.writer.buf(buf);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_head(OVERLAY_STR, s.len() as u64);
        self.writer.buf(s.as_bytes());
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        self.write_head(OVERLAY_ARR, length as u64);
    }

    pub fn write_map_hdr(&mut self, length: usize) {
        self.write_head(OVERLAY_MAP, length as u64);
    }

    pub fn write_tag(&mut self, tag: u64) {
        self.write_head(OVERLAY_TAG, tag);
    }

    /// Writes a Filecoin BigInt as a byte string.
    pub fn write_big_int(&mut self, value: &BigIntValue) {
        self.write_bin(&value.to_fvm_bytes());
    }

    /// Writes a CID as tag 42 over its binary form with the identity
    /// multibase prefix (`0x00`).
    pub fn write_cid(&mut self, cid: &[u8]) {
        self.write_tag(TAG_CID);
        self.write_head(OVERLAY_BIN, cid.len() as u64 + 1);
        self.writer.u8(0x00);
        self.writer.buf(cid);
    }

    /// Writes an initial byte with the shortest argument encoding.
    fn write_head(&mut self, overlay: u8, arg: u64) {
        let w = &mut self.writer;
        if arg <= 23 {
            w.u8(overlay | arg as u8);
        } else if arg <= 0xff {
            w.u8u8(overlay | MINOR_U8, arg as u8);
        } else if arg <= 0xffff {
            w.u8u16(overlay | MINOR_U16, arg as u16);
        } else if arg <= 0xffff_ffff {
            w.u8u32(overlay | MINOR_U32, arg as u32);
        } else {
            w.u8u64(overlay | MINOR_U64, arg);
        }
    }
}
