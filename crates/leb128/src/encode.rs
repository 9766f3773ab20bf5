use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

use crate::{Leb128Error, CONTINUE, GROUP_BITS};

/// Encodes an arbitrary-precision unsigned value.
///
/// Zero encodes to the single byte `0x00`.
pub fn encode_unsigned(value: &BigUint) -> Vec<u8> {
    let mut out = Vec::with_capacity((value.bits() as usize / GROUP_BITS as usize) + 1);
    let mut rest = value.clone();
    loop {
        let group = (rest.iter_u64_digits().next().unwrap_or(0) & 0x7f) as u8;
        rest >>= GROUP_BITS;
        if rest.is_zero() {
            out.push(group);
            return out;
        }
        out.push(group | CONTINUE);
    }
}

pub fn encode_u64(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(10);
    loop {
        let group = (value & 0x7f) as u8;
        value >>= GROUP_BITS;
        if value == 0 {
            out.push(group);
            return out;
        }
        out.push(group | CONTINUE);
    }
}

/// Encodes a signed value, rejecting negatives.
pub fn encode_big_int(value: &BigInt) -> Result<Vec<u8>, Leb128Error> {
    if value.sign() == Sign::Minus {
        return Err(Leb128Error::NegativeValue);
    }
    Ok(encode_unsigned(value.magnitude()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_boundaries() {
        assert_eq!(encode_u64(0), vec![0x00]);
        assert_eq!(encode_u64(127), vec![0x7f]);
        assert_eq!(encode_u64(128), vec![0x80, 0x01]);
        assert_eq!(encode_u64(16383), vec![0xff, 0x7f]);
        assert_eq!(encode_u64(16384), vec![0x80, 0x80, 0x01]);
        assert_eq!(encode_u64(1000), vec![0xe8, 0x07]);
    }

    #[test]
    fn test_u64_max() {
        let mut expected = vec![0xff; 9];
        expected.push(0x01);
        assert_eq!(encode_u64(u64::MAX), expected);
        assert_eq!(encode_unsigned(&BigUint::from(u64::MAX)), expected);
    }

    #[test]
    fn test_negative_rejected() {
        assert_eq!(
            encode_big_int(&BigInt::from(-1)),
            Err(Leb128Error::NegativeValue)
        );
        assert_eq!(encode_big_int(&BigInt::from(300)), Ok(vec![0xac, 0x02]));
    }
}
