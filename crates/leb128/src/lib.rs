//! Unsigned LEB128 varints.
//!
//! Values are arbitrary-precision so that encodings wider than a machine word
//! never truncate. Each byte carries 7 data bits, least significant group
//! first; the high bit is set on every byte except the last of a group.
//!
//! # Example
//!
//! ```
//! use fil_codec_leb128::{decode_u64, encode_u64};
//!
//! assert_eq!(encode_u64(127), vec![0x7f]);
//! assert_eq!(encode_u64(128), vec![0x80, 0x01]);
//! assert_eq!(decode_u64(&[0x80, 0x80, 0x01]), Ok((16384, 3)));
//! ```

mod decode;
mod encode;
mod sequence;

pub use decode::{decode_u64, decode_unsigned};
pub use encode::{encode_big_int, encode_u64, encode_unsigned};
pub use sequence::Leb128Sequence;

use thiserror::Error;

/// Data bits per encoded byte.
pub const GROUP_BITS: u32 = 7;

/// Continuation bit.
pub const CONTINUE: u8 = 0x80;

/// Error type for LEB128 encoding and decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Leb128Error {
    #[error("negative value cannot be encoded as unsigned LEB128")]
    NegativeValue,
    #[error("varint truncated: continuation bit set on the last byte")]
    Truncated,
    #[error("non-minimal varint encoding")]
    NonMinimal,
    #[error("varint does not fit in u64")]
    Overflow,
}
