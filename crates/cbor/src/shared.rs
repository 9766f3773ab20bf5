//! Shared convenience wrappers for CBOR encoding.

use fil_codec_bigint::BigIntValue;

use crate::{CborEncoder, CborValue};

/// Encode a [`CborValue`] into CBOR bytes.
pub fn encode(value: &CborValue) -> Vec<u8> {
    let mut encoder = CborEncoder::new();
    encoder.encode(value)
}

/// Encode a Filecoin BigInt as a standalone CBOR byte string.
pub fn encode_big_int(value: &BigIntValue) -> Vec<u8> {
    let mut encoder = CborEncoder::new();
    encoder.write_big_int(value);
    encoder.flush()
}
