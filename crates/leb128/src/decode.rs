use num_bigint::BigUint;

use crate::{Leb128Error, CONTINUE, GROUP_BITS};

/// Decodes one varint from the front of `data`.
///
/// Returns the value and the number of bytes consumed. A group whose final
/// byte is `0x00` (after at least one continuation byte) is non-minimal and
/// rejected.
pub fn decode_unsigned(data: &[u8]) -> Result<(BigUint, usize), Leb128Error> {
    let len = group_len(data)?;
    let mut value = BigUint::default();
    for &b in data[..len].iter().rev() {
        value <<= GROUP_BITS;
        value |= BigUint::from(b & !CONTINUE);
    }
    Ok((value, len))
}

/// Decodes one varint that must fit in a `u64`.
pub fn decode_u64(data: &[u8]) -> Result<(u64, usize), Leb128Error> {
    let len = group_len(data)?;
    let mut value: u64 = 0;
    for (i, &b) in data[..len].iter().enumerate() {
        let part = (b & !CONTINUE) as u64;
        let shift = i as u32 * GROUP_BITS;
        if shift >= 64 || (shift > 0 && part >> (64 - shift) != 0) {
            return Err(Leb128Error::Overflow);
        }
        value |= part << shift;
    }
    Ok((value, len))
}

fn group_len(data: &[u8]) -> Result<usize, Leb128Error> {
    let end = data
        .iter()
        .position(|b| b & CONTINUE == 0)
        .ok_or(Leb128Error::Truncated)?;
    if end > 0 && data[end] == 0 {
        return Err(Leb128Error::NonMinimal);
    }
    Ok(end + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_u64() {
        assert_eq!(decode_u64(&[0x00]), Ok((0, 1)));
        assert_eq!(decode_u64(&[0xe8, 0x07, 0xff]), Ok((1000, 2)));
    }

    #[test]
    fn test_truncated() {
        assert_eq!(decode_u64(&[]), Err(Leb128Error::Truncated));
        assert_eq!(decode_u64(&[0x80, 0x80]), Err(Leb128Error::Truncated));
    }

    #[test]
    fn test_non_minimal() {
        assert_eq!(decode_u64(&[0x80, 0x00]), Err(Leb128Error::NonMinimal));
        assert_eq!(decode_unsigned(&[0xff, 0x00]), Err(Leb128Error::NonMinimal));
    }

    #[test]
    fn test_u64_overflow() {
        let mut max = vec![0xff; 9];
        max.push(0x01);
        assert_eq!(decode_u64(&max), Ok((u64::MAX, 10)));
        max[9] = 0x02;
        assert_eq!(decode_u64(&max), Err(Leb128Error::Overflow));
        let (wide, used) = decode_unsigned(&max).unwrap();
        assert_eq!(used, 10);
        assert_eq!(wide, BigUint::from(u64::MAX) + BigUint::from(1u64 << 63));
    }
}
