//! Ethereum ABI encoding of oracle results.
//!
//! Only the four tuple shapes the differential harness decodes are
//! supported: `(bool, bytes)`, `(bool, bool, bytes)`, `(int256)` and
//! `(bool)`.

use alloy_primitives::{Bytes, I256, U256};
use alloy_sol_types::{sol_data, SolType};
use fil_codec_bigint::{BigIntError, BigIntValue};

type BoolBytes = (sol_data::Bool, sol_data::Bytes);
type BoolBoolBytes = (sol_data::Bool, sol_data::Bool, sol_data::Bytes);

/// Magnitude as the harness writes it: minimal big-endian, zero as `0x00`.
pub fn result_bytes(value: &BigIntValue) -> Vec<u8> {
    if value.is_zero() {
        vec![0x00]
    } else {
        value.magnitude().to_vec()
    }
}

/// `abi.encode(bool, bytes)`.
pub fn encode_bool_bytes(flag: bool, data: &[u8]) -> Vec<u8> {
    <BoolBytes as SolType>::abi_encode_params(&(flag, Bytes::from(data.to_vec())))
}

/// `abi.encode(bool, bool, bytes)`.
pub fn encode_bool_bool_bytes(first: bool, second: bool, data: &[u8]) -> Vec<u8> {
    <BoolBoolBytes as SolType>::abi_encode_params(&(first, second, Bytes::from(data.to_vec())))
}

/// `abi.encode(int256)`; values outside the signed 256-bit range are rejected.
pub fn encode_int256(value: &BigIntValue) -> Result<Vec<u8>, BigIntError> {
    let word = I256::from_raw(U256::from_be_bytes(value.to_word_signed()?));
    Ok(<sol_data::Int<256> as SolType>::abi_encode(&word))
}

/// `abi.encode(bool)`.
pub fn encode_bool(flag: bool) -> Vec<u8> {
    <sol_data::Bool as SolType>::abi_encode(&flag)
}

/// `abi.encode(bool, bytes)` of a signed result: the sign flag, then the
/// magnitude.
pub fn encode_signed_result(value: &BigIntValue) -> Vec<u8> {
    encode_bool_bytes(value.is_negative(), &result_bytes(value))
}

#[cfg(test)]
mod tests {
    use fil_codec_bigint::WORD_BYTES;

    use super::*;

    fn word(last: u8) -> Vec<u8> {
        let mut w = vec![0u8; WORD_BYTES];
        w[WORD_BYTES - 1] = last;
        w
    }

    #[test]
    fn test_bool_bytes_layout() {
        let out = encode_bool_bytes(true, &[0xab, 0xcd]);
        assert_eq!(out.len(), 4 * WORD_BYTES);
        assert_eq!(&out[..32], &word(1)[..]);
        assert_eq!(&out[32..64], &word(0x40)[..]);
        assert_eq!(&out[64..96], &word(2)[..]);
        assert_eq!(&out[96..98], &[0xab, 0xcd]);
        assert!(out[98..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bytes_exactly_one_word() {
        let out = encode_bool_bytes(false, &[0x11; 32]);
        assert_eq!(out.len(), 4 * WORD_BYTES);
        assert_eq!(&out[96..], &[0x11; 32]);

        let out = encode_bool_bytes(false, &[0x11; 33]);
        assert_eq!(out.len(), 5 * WORD_BYTES);
    }

    #[test]
    fn test_empty_bytes() {
        let out = encode_bool_bytes(false, &[]);
        assert_eq!(out.len(), 3 * WORD_BYTES);
        assert_eq!(&out[64..], &word(0)[..]);
    }

    #[test]
    fn test_bool_bool_bytes_layout() {
        let out = encode_bool_bool_bytes(true, false, &[0x04]);
        assert_eq!(out.len(), 5 * WORD_BYTES);
        assert_eq!(&out[..32], &word(1)[..]);
        assert_eq!(&out[32..64], &word(0)[..]);
        assert_eq!(&out[64..96], &word(0x60)[..]);
        assert_eq!(&out[96..128], &word(1)[..]);
        assert_eq!(out[128], 0x04);
    }

    #[test]
    fn test_int256() {
        assert_eq!(encode_int256(&BigIntValue::from(1i8)).unwrap(), word(1));
        assert_eq!(
            encode_int256(&BigIntValue::from(-1i8)).unwrap(),
            vec![0xff; WORD_BYTES]
        );
        assert_eq!(encode_int256(&BigIntValue::zero()).unwrap(), word(0));

        let mut min = vec![0x80];
        min.extend([0u8; WORD_BYTES - 1]);
        let lowest = BigIntValue::new(min.clone(), true);
        assert_eq!(encode_int256(&lowest).unwrap(), min);
        assert_eq!(
            encode_int256(&BigIntValue::new(min, false)),
            Err(BigIntError::OutOfRange("int256"))
        );
    }

    #[test]
    fn test_zero_result_bytes() {
        assert_eq!(result_bytes(&BigIntValue::zero()), vec![0x00]);
        assert_eq!(result_bytes(&BigIntValue::from(256u32)), vec![0x01, 0x00]);
        assert_eq!(encode_bool(true), word(1));
    }
}
