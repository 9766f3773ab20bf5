use num_bigint::BigUint;

use crate::{decode_unsigned, encode_u64, encode_unsigned, Leb128Error};

/// Concatenated unsigned varints, as used for compact parameter packing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Leb128Sequence {
    bytes: Vec<u8>,
}

impl Leb128Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing bytes without validating them; see [`Self::decode_all`].
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn push(&mut self, value: &BigUint) {
        self.bytes.extend(encode_unsigned(value));
    }

    pub fn push_u64(&mut self, value: u64) {
        self.bytes.extend(encode_u64(value));
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Decodes every varint in order; fails on the first malformed group.
    pub fn decode_all(&self) -> Result<Vec<BigUint>, Leb128Error> {
        let mut out = Vec::new();
        let mut rest = self.bytes.as_slice();
        while !rest.is_empty() {
            let (value, used) = decode_unsigned(rest)?;
            out.push(value);
            rest = &rest[used..];
        }
        Ok(out)
    }
}
