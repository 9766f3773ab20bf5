//! [`BigIntValue`]: sign+magnitude integer in its canonical byte form.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;

use crate::BigIntError;

/// Width of an EVM word in bytes.
pub const WORD_BYTES: usize = 32;

/// An integer as an unsigned big-endian magnitude plus a sign flag.
///
/// Values are always normalized: the magnitude has no leading zero byte, zero
/// is the empty magnitude, and zero is never negative. Every constructor
/// enforces this, so two equal integers always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BigIntValue {
    magnitude: Vec<u8>,
    negative: bool,
}

impl BigIntValue {
    /// Builds a value from raw producer output.
    ///
    /// Leading zero bytes are stripped and a sign flag on an empty (or all
    /// zero) magnitude is dropped, so `{val: 0x, neg: true}` decodes to zero.
    pub fn new(magnitude: impl Into<Vec<u8>>, negative: bool) -> Self {
        let mut magnitude = magnitude.into();
        let lead = magnitude.iter().take_while(|&&b| b == 0).count();
        if lead > 0 {
            magnitude.drain(..lead);
        }
        let negative = negative && !magnitude.is_empty();
        Self {
            magnitude,
            negative,
        }
    }

    /// The canonical zero: empty magnitude, not negative.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Non-negative value from an unsigned arbitrary-precision integer.
    pub fn from_uint(value: &BigUint) -> Self {
        Self::new(value.to_bytes_be(), false)
    }

    /// Parses a hex magnitude (optional `0x` prefix, odd length allowed).
    pub fn from_hex(hex_str: &str, negative: bool) -> Result<Self, BigIntError> {
        let digits = hex_str
            .strip_prefix("0x")
            .or_else(|| hex_str.strip_prefix("0X"))
            .unwrap_or(hex_str);
        let padded;
        let digits = if digits.len() % 2 == 1 {
            padded = format!("0{digits}");
            padded.as_str()
        } else {
            digits
        };
        let magnitude =
            hex::decode(digits).map_err(|_| BigIntError::InvalidHex(hex_str.to_string()))?;
        Ok(Self::new(magnitude, negative))
    }

    /// Minimal big-endian magnitude; empty for zero.
    pub fn magnitude(&self) -> &[u8] {
        &self.magnitude
    }

    /// Sign flag; always `false` for zero.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// `true` when the magnitude is empty.
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_empty()
    }

    /// Splits into `(magnitude, negative)`.
    pub fn into_parts(self) -> (Vec<u8>, bool) {
        (self.magnitude, self.negative)
    }

    /// `0x`-prefixed hex of the magnitude (`0x` for zero).
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.magnitude))
    }

    /// The magnitude as an unsigned integer, ignoring the sign.
    pub fn magnitude_uint(&self) -> BigUint {
        BigUint::from_bytes_be(&self.magnitude)
    }

    /// Signed arbitrary-precision value.
    pub fn to_big_int(&self) -> BigInt {
        let sign = if self.negative {
            Sign::Minus
        } else {
            Sign::Plus
        };
        BigInt::from_biguint(sign, self.magnitude_uint())
    }

    /// Normalized form of a signed arbitrary-precision value.
    pub fn from_big_int(value: &BigInt) -> Self {
        let (sign, magnitude) = value.to_bytes_be();
        Self::new(magnitude, sign == Sign::Minus)
    }

    /// Reads a `uint256` word.
    pub fn from_word_unsigned(word: &[u8; WORD_BYTES]) -> Self {
        Self::new(word.to_vec(), false)
    }

    /// Reads an `int256` two's-complement word.
    pub fn from_word_signed(word: &[u8; WORD_BYTES]) -> Self {
        Self::from_big_int(&BigInt::from_signed_bytes_be(word))
    }

    /// Writes the value as a `uint256` word.
    pub fn to_word_unsigned(&self) -> Result<[u8; WORD_BYTES], BigIntError> {
        if self.negative || self.magnitude.len() > WORD_BYTES {
            return Err(BigIntError::OutOfRange("uint256"));
        }
        let mut word = [0u8; WORD_BYTES];
        word[WORD_BYTES - self.magnitude.len()..].copy_from_slice(&self.magnitude);
        Ok(word)
    }

    /// Writes the value as an `int256` two's-complement word.
    pub fn to_word_signed(&self) -> Result<[u8; WORD_BYTES], BigIntError> {
        let bytes = self.to_big_int().to_signed_bytes_be();
        if bytes.len() > WORD_BYTES {
            return Err(BigIntError::OutOfRange("int256"));
        }
        let fill = if self.negative { 0xff } else { 0x00 };
        let mut word = [fill; WORD_BYTES];
        word[WORD_BYTES - bytes.len()..].copy_from_slice(&bytes);
        Ok(word)
    }

    /// Filecoin BigInt wire bytes: empty for zero, otherwise a sign byte
    /// (`0x00` positive, `0x01` negative) followed by the magnitude.
    pub fn to_fvm_bytes(&self) -> Vec<u8> {
        if self.is_zero() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(1 + self.magnitude.len());
        out.push(self.negative as u8);
        out.extend_from_slice(&self.magnitude);
        out
    }

    /// Parses Filecoin BigInt wire bytes.
    pub fn from_fvm_bytes(bytes: &[u8]) -> Result<Self, BigIntError> {
        let Some((&sign, magnitude)) = bytes.split_first() else {
            return Ok(Self::zero());
        };
        let negative = match sign {
            0 => false,
            1 => true,
            other => return Err(BigIntError::InvalidSignByte(other)),
        };
        Ok(Self::new(magnitude, negative))
    }
}

/// Encodes an arbitrary-precision integer into its canonical byte form.
pub fn to_bytes(value: &BigInt) -> BigIntValue {
    BigIntValue::from_big_int(value)
}

/// Decodes the canonical byte form back into an arbitrary-precision integer.
pub fn from_bytes(value: &BigIntValue) -> BigInt {
    value.to_big_int()
}

impl std::fmt::Display for BigIntValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_big_int())
    }
}

impl From<BigInt> for BigIntValue {
    fn from(value: BigInt) -> Self {
        Self::from_big_int(&value)
    }
}

impl From<&BigIntValue> for BigInt {
    fn from(value: &BigIntValue) -> Self {
        value.to_big_int()
    }
}

impl From<BigUint> for BigIntValue {
    fn from(value: BigUint) -> Self {
        Self::from_uint(&value)
    }
}

macro_rules! impl_from_native {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigIntValue {
                fn from(value: $t) -> Self {
                    Self::from_big_int(&BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_native!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

macro_rules! impl_try_into_native {
    ($($t:ty => $to:ident),*) => {
        $(
            impl TryFrom<&BigIntValue> for $t {
                type Error = BigIntError;

                fn try_from(value: &BigIntValue) -> Result<Self, Self::Error> {
                    value
                        .to_big_int()
                        .$to()
                        .ok_or(BigIntError::OutOfRange(stringify!($t)))
                }
            }
        )*
    };
}

impl_try_into_native!(i64 => to_i64, u64 => to_u64, i128 => to_i128, u128 => to_u128);
