//! Sign+magnitude big integers for fil-codec.
//!
//! The remote actor runtime carries integers as an unsigned big-endian
//! magnitude plus a separate sign flag (`{val: bytes, neg: bool}`), while the
//! EVM side works on 256-bit two's-complement words. [`BigIntValue`] is the
//! canonical meeting point of the two; [`ops`] performs exact arithmetic on
//! it without ever truncating to a fixed width.
//!
//! # Example
//!
//! ```
//! use fil_codec_bigint::{ops, BigIntValue};
//!
//! let a = BigIntValue::from(-5i64);
//! let b = BigIntValue::from(3u8);
//! assert_eq!(ops::add(&a, &b), BigIntValue::from(-2i64));
//! assert_eq!(ops::cmp(&a, &b, false), 1);
//! assert_eq!(ops::sub(&a, &a), BigIntValue::zero());
//! ```

mod error;
mod value;

pub mod ops;

pub use error::BigIntError;
pub use value::{from_bytes, to_bytes, BigIntValue, WORD_BYTES};

pub use num_bigint::{BigInt, BigUint};
