//! Exact arithmetic on [`BigIntValue`].
//!
//! Every operation rebuilds the operands as arbitrary-precision integers,
//! computes the exact result, and re-normalizes into sign+magnitude form.
//! Nothing is ever reduced to a fixed-width word.
//!
//! Modular operations use the *unsigned* modulus: the result always lies in
//! `[0, |n|)` whatever the sign of the dividend, which differs from the
//! remainder of truncating division.

use std::cmp::Ordering;

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::{from_bytes, to_bytes, BigIntError, BigIntValue};

/// Result of [`invmod`].
///
/// `valid` is `false` when `a` has no inverse modulo `m`; `value` is then
/// whatever the extended Euclidean algorithm produced and must not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvMod {
    pub valid: bool,
    pub value: BigIntValue,
}

/// Largest shift accepted by [`shl`]; a left shift allocates the whole result.
pub const MAX_SHIFT_BITS: usize = 1 << 20;

/// Exact signed sum.
pub fn add(a: &BigIntValue, b: &BigIntValue) -> BigIntValue {
    to_bytes(&(from_bytes(a) + from_bytes(b)))
}

/// Exact signed difference; `a - a` is the canonical zero.
pub fn sub(a: &BigIntValue, b: &BigIntValue) -> BigIntValue {
    to_bytes(&(from_bytes(a) - from_bytes(b)))
}

/// Exact signed product.
pub fn mul(a: &BigIntValue, b: &BigIntValue) -> BigIntValue {
    to_bytes(&(from_bytes(a) * from_bytes(b)))
}

/// Signed division truncating toward zero (EVM `sdiv` semantics).
pub fn div(a: &BigIntValue, b: &BigIntValue) -> Result<BigIntValue, BigIntError> {
    if b.is_zero() {
        return Err(BigIntError::DivisionByZero);
    }
    Ok(to_bytes(&(from_bytes(a) / from_bytes(b))))
}

/// Unsigned modulus: `a mod |n|`, always in `[0, |n|)`.
pub fn modulo(a: &BigIntValue, n: &BigIntValue) -> Result<BigIntValue, BigIntError> {
    let n = modulus(n)?;
    Ok(BigIntValue::from_uint(&umod(&from_bytes(a), &n)))
}

/// `(a * b) mod |n|` with the unsigned modulus.
pub fn modmul(
    a: &BigIntValue,
    b: &BigIntValue,
    n: &BigIntValue,
) -> Result<BigIntValue, BigIntError> {
    let n = modulus(n)?;
    let product = from_bytes(a) * from_bytes(b);
    Ok(BigIntValue::from_uint(&umod(&product, &n)))
}

/// `(a mod |n|) ^ |e| mod |n|`.
///
/// The exponent is taken as its unsigned magnitude; the base is reduced with
/// the unsigned modulus before exponentiation.
pub fn modexp(
    a: &BigIntValue,
    e: &BigIntValue,
    n: &BigIntValue,
) -> Result<BigIntValue, BigIntError> {
    let n = modulus(n)?;
    if n.is_one() {
        return Ok(BigIntValue::zero());
    }
    let exponent = e.magnitude_uint();
    if exponent.is_zero() {
        return Ok(BigIntValue::from(1u8));
    }
    let base = umod(&from_bytes(a), &n);
    Ok(BigIntValue::from_uint(&base.modpow(&exponent, &n)))
}

/// Modular inverse of `a` modulo `|m|` via the extended Euclidean algorithm.
///
/// The validity flag is computed independently as `(a * value) mod m == 1`.
pub fn invmod(a: &BigIntValue, m: &BigIntValue) -> Result<InvMod, BigIntError> {
    let m = modulus(m)?;
    let m_int = BigInt::from(m.clone());
    let a_int = from_bytes(a);

    let egcd = BigInt::from(umod(&a_int, &m)).extended_gcd(&m_int);
    let value = egcd.x.mod_floor(&m_int);
    let valid = umod(&(a_int * &value), &m).is_one();
    Ok(InvMod {
        valid,
        value: to_bytes(&value),
    })
}

/// Shifts the magnitude left by `bits`; the sign flag is kept.
///
/// Shifts above [`MAX_SHIFT_BITS`] fail with [`BigIntError::ShiftTooLarge`].
pub fn shl(a: &BigIntValue, bits: usize) -> Result<BigIntValue, BigIntError> {
    if bits > MAX_SHIFT_BITS {
        return Err(BigIntError::ShiftTooLarge(bits));
    }
    Ok(BigIntValue::new(
        (a.magnitude_uint() << bits).to_bytes_be(),
        a.is_negative(),
    ))
}

/// Shifts the magnitude right by `bits`; the sign flag is kept unless the
/// result is zero.
pub fn shr(a: &BigIntValue, bits: usize) -> BigIntValue {
    BigIntValue::new((a.magnitude_uint() >> bits).to_bytes_be(), a.is_negative())
}

/// Three-way comparison returning `-1`, `0` or `1`.
///
/// With `signed = false` both operands are compared as unsigned magnitudes
/// and their sign flags are ignored.
pub fn cmp(a: &BigIntValue, b: &BigIntValue, signed: bool) -> i8 {
    let ordering = if signed {
        from_bytes(a).cmp(&from_bytes(b))
    } else {
        a.magnitude_uint().cmp(&b.magnitude_uint())
    };
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// `true` for zero, whatever the sign flag.
pub fn is_zero(a: &BigIntValue) -> bool {
    a.is_zero()
}

fn modulus(n: &BigIntValue) -> Result<BigUint, BigIntError> {
    if n.is_zero() {
        return Err(BigIntError::DivisionByZero);
    }
    Ok(n.magnitude_uint())
}

fn umod(a: &BigInt, n: &BigUint) -> BigUint {
    let n = BigInt::from(n.clone());
    a.mod_floor(&n).magnitude().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: i128) -> BigIntValue {
        BigIntValue::from(x)
    }

    #[test]
    fn test_cmp_scenarios() {
        assert_eq!(cmp(&v(5), &v(3), true), 1);
        assert_eq!(cmp(&v(-5), &v(3), true), -1);
        assert_eq!(cmp(&v(-5), &v(3), false), 1);
        assert_eq!(cmp(&v(-3), &v(3), false), 0);
        assert_eq!(cmp(&v(0), &v(0), true), 0);
    }

    #[test]
    fn test_sub_self_is_canonical_zero() {
        let a = v(-123_456_789);
        let r = sub(&a, &a);
        assert!(r.magnitude().is_empty());
        assert!(!r.is_negative());
    }

    #[test]
    fn test_mul_sign() {
        assert_eq!(mul(&v(-4), &v(5)), v(-20));
        assert_eq!(mul(&v(-4), &v(-5)), v(20));
        assert_eq!(mul(&v(-4), &v(0)), BigIntValue::zero());
    }

    #[test]
    fn test_div_truncates_toward_zero() {
        assert_eq!(div(&v(-7), &v(2)).unwrap(), v(-3));
        assert_eq!(div(&v(7), &v(-2)).unwrap(), v(-3));
        assert_eq!(div(&v(-7), &v(-2)).unwrap(), v(3));
        assert_eq!(div(&v(1), &v(-2)).unwrap(), BigIntValue::zero());
        assert_eq!(div(&v(1), &v(0)), Err(BigIntError::DivisionByZero));
    }

    #[test]
    fn test_modulo_is_unsigned() {
        assert_eq!(modulo(&v(-7), &v(3)).unwrap(), v(2));
        assert_eq!(modulo(&v(7), &v(3)).unwrap(), v(1));
        assert_eq!(modulo(&v(-7), &v(-3)).unwrap(), v(2));
        assert_eq!(modulo(&v(-6), &v(3)).unwrap(), BigIntValue::zero());
        assert_eq!(modulo(&v(1), &v(0)), Err(BigIntError::DivisionByZero));
    }

    #[test]
    fn test_modmul() {
        assert_eq!(modmul(&v(-4), &v(5), &v(7)).unwrap(), v(1));
        assert_eq!(modmul(&v(4), &v(5), &v(7)).unwrap(), v(6));
    }

    #[test]
    fn test_modexp() {
        assert_eq!(modexp(&v(4), &v(13), &v(497)).unwrap(), v(445));
        assert_eq!(modexp(&v(-2), &v(3), &v(5)).unwrap(), v(2));
        assert_eq!(modexp(&v(9), &v(0), &v(5)).unwrap(), v(1));
        assert_eq!(modexp(&v(9), &v(4), &v(1)).unwrap(), BigIntValue::zero());
        assert_eq!(modexp(&v(2), &v(-3), &v(5)).unwrap(), v(3));
    }

    #[test]
    fn test_invmod() {
        let r = invmod(&v(3), &v(11)).unwrap();
        assert!(r.valid);
        assert_eq!(r.value, v(4));

        let r = invmod(&v(6), &v(9)).unwrap();
        assert!(!r.valid);

        let r = invmod(&v(5), &v(1)).unwrap();
        assert!(!r.valid);
        assert_eq!(r.value, BigIntValue::zero());

        assert_eq!(invmod(&v(5), &v(0)), Err(BigIntError::DivisionByZero));
    }

    #[test]
    fn test_shifts_keep_sign() {
        assert_eq!(shl(&v(-3), 4).unwrap(), v(-48));
        assert_eq!(shr(&v(-48), 4), v(-3));
        assert_eq!(shr(&v(-7), 1), v(-3));
        assert_eq!(shr(&v(-1), 1), BigIntValue::zero());
        assert_eq!(shl(&v(1), 255).unwrap().magnitude().len(), 32);
    }

    #[test]
    fn test_shl_bound() {
        assert_eq!(
            shl(&v(1), MAX_SHIFT_BITS).unwrap().magnitude().len(),
            MAX_SHIFT_BITS / 8 + 1
        );
        assert_eq!(
            shl(&v(1), MAX_SHIFT_BITS + 1),
            Err(BigIntError::ShiftTooLarge(MAX_SHIFT_BITS + 1))
        );
        assert_eq!(
            shl(&BigIntValue::zero(), usize::MAX),
            Err(BigIntError::ShiftTooLarge(usize::MAX))
        );
        assert_eq!(shr(&v(1), usize::MAX), BigIntValue::zero());
    }

    #[test]
    fn test_invmod_wide_modulus() {
        // 2^255 - 19
        let mut p = vec![0x7f];
        p.extend([0xff; 30]);
        p.push(0xed);
        let p = BigIntValue::new(p, false);
        let a = v(-2);
        let r = invmod(&a, &p).unwrap();
        assert!(r.valid);
        assert!(!r.value.is_negative());
        assert_eq!(modmul(&a, &r.value, &p).unwrap(), v(1));
    }

    #[test]
    fn test_is_zero() {
        assert!(is_zero(&BigIntValue::new(vec![0, 0], true)));
        assert!(!is_zero(&v(-1)));
    }
}
