//! Restricted CBOR codec for actor call parameters and returns.
//!
//! The decoder accepts exactly the subset a Filecoin runtime emits for call
//! returns: integers, byte and text strings, definite-length arrays and maps,
//! and `false`/`true`/`null`. The encoder writes the same subset with minimal
//! headers, plus tags for CIDs.
//!
//! # Example
//!
//! ```
//! use fil_codec_cbor::{decode, decode_fixed_array, encode, CborValue};
//!
//! assert_eq!(decode(&[0xf5]).unwrap(), (CborValue::Bool(true), 1));
//!
//! let items = decode_fixed_array(&[0x82, 0x01, 0x02], 2).unwrap();
//! assert_eq!(items, vec![CborValue::UnsignedInt(1), CborValue::UnsignedInt(2)]);
//!
//! let bytes = encode(&CborValue::FixedArray(items));
//! assert_eq!(bytes, vec![0x82, 0x01, 0x02]);
//! ```

pub mod constants;
mod decoder;
mod encoder;
mod error;
mod shared;
mod value;

pub use decoder::{decode, decode_exact, decode_fixed_array, CborReader};
pub use encoder::CborEncoder;
pub use error::CborError;
pub use shared::{encode, encode_big_int};
pub use value::CborValue;
