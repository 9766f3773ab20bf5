//! CBOR decoder for the subset emitted by actor call returns.
//!
//! Supported: unsigned and negative integers (direct and 1/2/4/8-byte forms),
//! byte strings, UTF-8 text strings, definite-length arrays and maps, and the
//! simple values `false`, `true` and `null`. Tags, floats, `undefined` and
//! indefinite lengths are rejected with [`CborError::UnsupportedType`].
//!
//! Decoding is all-or-nothing: the first malformed item aborts the decode.

use fil_codec_bigint::BigIntValue;
use fil_codec_buffers::Reader;

use crate::constants::*;
use crate::{CborError, CborValue};

/// Decoded initial byte plus its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Head {
    initial: u8,
    major: u8,
    arg: u64,
}

/// Streaming reader over one CBOR buffer.
///
/// Typed `read_*` methods mirror how actor return tuples are consumed field
/// by field; [`CborReader::read_any`] decodes a whole item into a
/// [`CborValue`].
///
/// # Example
///
/// ```
/// use fil_codec_cbor::CborReader;
///
/// // [1000, h'0102', true]
/// let data = [0x83, 0x19, 0x03, 0xe8, 0x42, 0x01, 0x02, 0xf5];
/// let mut r = CborReader::new(&data);
/// r.expect_array(3).unwrap();
/// assert_eq!(r.read_u64().unwrap(), 1000);
/// assert_eq!(r.read_bytes().unwrap(), &[0x01, 0x02]);
/// assert!(r.read_bool().unwrap());
/// assert!(r.is_empty());
/// ```
pub struct CborReader<'a> {
    reader: Reader<'a>,
}

impl<'a> CborReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    pub fn is_empty(&self) -> bool {
        self.reader.is_empty()
    }

    /// Decodes the next complete item.
    pub fn read_any(&mut self) -> Result<CborValue, CborError> {
        self.read_value(0)
    }

    /// `true` if the next item is `null`, without consuming it.
    pub fn is_null_next(&self) -> Result<bool, CborError> {
        Ok(self.reader.peek()? == CBOR_NULL)
    }

    /// Reads an unsigned integer.
    pub fn read_u64(&mut self) -> Result<u64, CborError> {
        let head = self.read_head()?;
        match head.major {
            MAJOR_UIN => Ok(head.arg),
            _ => Err(unexpected("unsigned integer", head)),
        }
    }

    /// Reads an unsigned or negative integer that fits in an `i64`.
    pub fn read_i64(&mut self) -> Result<i64, CborError> {
        let head = self.read_head()?;
        match head.major {
            MAJOR_UIN => i64::try_from(head.arg).map_err(|_| CborError::IntegerOverflow("i64")),
            MAJOR_NIN => i64::try_from(head.arg)
                .map(|n| -1 - n)
                .map_err(|_| CborError::IntegerOverflow("i64")),
            _ => Err(unexpected("integer", head)),
        }
    }

    /// Reads `false` or `true`.
    pub fn read_bool(&mut self) -> Result<bool, CborError> {
        let head = self.read_head()?;
        match (head.major, head.arg as u8) {
            (MAJOR_TKN, SIMPLE_FALSE) => Ok(false),
            (MAJOR_TKN, SIMPLE_TRUE) => Ok(true),
            _ => Err(unexpected("bool", head)),
        }
    }

    /// Reads `null`.
    pub fn read_null(&mut self) -> Result<(), CborError> {
        let head = self.read_head()?;
        match (head.major, head.arg as u8) {
            (MAJOR_TKN, SIMPLE_NULL) => Ok(()),
            _ => Err(unexpected("null", head)),
        }
    }

    /// Reads a byte string, borrowing it from the input.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], CborError> {
        let head = self.read_head()?;
        if head.major != MAJOR_BIN {
            return Err(unexpected("byte string", head));
        }
        let len = self.length(head.arg)?;
        Ok(self.reader.buf(len)?)
    }

    /// Reads a text string; the returned `&str` borrows the input bytes
    /// unchanged.
    pub fn read_text(&mut self) -> Result<&'a str, CborError> {
        let head = self.read_head()?;
        if head.major != MAJOR_STR {
            return Err(unexpected("text string", head));
        }
        let len = self.length(head.arg)?;
        Ok(self.reader.utf8(len)?)
    }

    /// Reads a Filecoin BigInt carried in a byte string.
    pub fn read_big_int(&mut self) -> Result<BigIntValue, CborError> {
        let bytes = self.read_bytes()?;
        Ok(BigIntValue::from_fvm_bytes(bytes)?)
    }

    /// Reads a tag-42 CID and returns its binary form without the `0x00`
    /// multibase prefix.
    ///
    /// This is the one place a tag is accepted; [`CborReader::read_any`]
    /// still rejects tags.
    pub fn read_cid(&mut self) -> Result<&'a [u8], CborError> {
        let initial = self.reader.u8()?;
        let unexpected = CborError::UnexpectedType {
            expected: "cid",
            initial_byte: initial,
        };
        if initial != OVERLAY_TAG | MINOR_U8 || self.reader.u8()? as u64 != TAG_CID {
            return Err(unexpected);
        }
        match self.read_bytes()? {
            [0x00, cid @ ..] => Ok(cid),
            _ => Err(unexpected),
        }
    }

    pub fn read_array_len(&mut self) -> Result<usize, CborError> {
        let head = self.read_head()?;
        if head.major != MAJOR_ARR {
            return Err(unexpected("array", head));
        }
        self.count(head.arg, 1)
    }

    pub fn read_map_len(&mut self) -> Result<usize, CborError> {
        let head = self.read_head()?;
        if head.major != MAJOR_MAP {
            return Err(unexpected("map", head));
        }
        self.count(head.arg, 2)
    }

    /// Reads an array header and checks its declared arity.
    pub fn expect_array(&mut self, arity: usize) -> Result<(), CborError> {
        let found = self.read_array_len()?;
        if found != arity {
            return Err(CborError::ArityMismatch {
                expected: arity,
                found,
            });
        }
        Ok(())
    }

    fn read_value(&mut self, depth: usize) -> Result<CborValue, CborError> {
        let head = self.read_head()?;
        match head.major {
            MAJOR_UIN => Ok(CborValue::UnsignedInt(head.arg)),
            MAJOR_NIN => Ok(CborValue::NegativeInt(head.arg)),
            MAJOR_BIN => {
                let len = self.length(head.arg)?;
                Ok(CborValue::ByteString(self.reader.buf(len)?.to_vec()))
            }
            MAJOR_STR => {
                let len = self.length(head.arg)?;
                Ok(CborValue::TextString(self.reader.utf8(len)?.to_owned()))
            }
            MAJOR_ARR => {
                let count = self.count(head.arg, 1)?;
                let depth = nested(depth)?;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    items.push(self.read_value(depth)?);
                }
                Ok(CborValue::FixedArray(items))
            }
            MAJOR_MAP => {
                let count = self.count(head.arg, 2)?;
                let depth = nested(depth)?;
                let mut entries = Vec::with_capacity(count);
                for _ in 0..count {
                    let key = self.read_value(depth)?;
                    let value = self.read_value(depth)?;
                    entries.push((key, value));
                }
                Ok(CborValue::Map(entries))
            }
            _ => match head.arg as u8 {
                SIMPLE_FALSE => Ok(CborValue::Bool(false)),
                SIMPLE_TRUE => Ok(CborValue::Bool(true)),
                SIMPLE_NULL => Ok(CborValue::Null),
                _ => Err(CborError::UnsupportedType {
                    initial_byte: head.initial,
                }),
            },
        }
    }

    /// Reads the initial byte and any length-extension bytes.
    ///
    /// For major type 7 only `false`, `true` and `null` are accepted and the
    /// argument is the simple value itself.
    fn read_head(&mut self) -> Result<Head, CborError> {
        let initial = self.reader.u8()?;
        let major = initial >> 5;
        let minor = initial & MINOR_MASK;
        let unsupported = CborError::UnsupportedType {
            initial_byte: initial,
        };
        match major {
            MAJOR_TAG => return Err(unsupported),
            MAJOR_TKN => {
                return match minor {
                    SIMPLE_FALSE | SIMPLE_TRUE | SIMPLE_NULL => Ok(Head {
                        initial,
                        major,
                        arg: minor as u64,
                    }),
                    _ => Err(unsupported),
                };
            }
            _ => {}
        }
        let arg = match minor {
            0..=23 => minor as u64,
            MINOR_U8 => self.reader.u8()? as u64,
            MINOR_U16 => self.reader.u16()? as u64,
            MINOR_U32 => self.reader.u32()? as u64,
            MINOR_U64 => self.reader.u64()?,
            _ => return Err(unsupported),
        };
        Ok(Head {
            initial,
            major,
            arg,
        })
    }

    /// Converts a declared byte length, failing if it exceeds the buffer.
    fn length(&self, arg: u64) -> Result<usize, CborError> {
        let remaining = self.reader.size();
        match usize::try_from(arg) {
            Ok(len) if len <= remaining => Ok(len),
            _ => Err(CborError::TruncatedInput {
                needed: usize::try_from(arg).unwrap_or(usize::MAX),
                remaining,
            }),
        }
    }

    /// Converts a declared item count; every item takes at least one byte,
    /// so a count larger than the remaining input is already truncated.
    fn count(&self, arg: u64, bytes_per_item: usize) -> Result<usize, CborError> {
        let count = self.length(arg)?;
        let needed = count.saturating_mul(bytes_per_item);
        let remaining = self.reader.size();
        if needed > remaining {
            return Err(CborError::TruncatedInput { needed, remaining });
        }
        Ok(count)
    }
}

fn nested(depth: usize) -> Result<usize, CborError> {
    if depth >= MAX_DEPTH {
        return Err(CborError::NestingTooDeep(MAX_DEPTH));
    }
    Ok(depth + 1)
}

fn unexpected(expected: &'static str, head: Head) -> CborError {
    CborError::UnexpectedType {
        expected,
        initial_byte: head.initial,
    }
}

/// Decodes a single top-level item, returning it with the bytes consumed.
pub fn decode(data: &[u8]) -> Result<(CborValue, usize), CborError> {
    let mut reader = CborReader::new(data);
    let value = reader.read_any()?;
    Ok((value, reader.position()))
}

/// Decodes a single top-level item that must span the whole buffer.
pub fn decode_exact(data: &[u8]) -> Result<CborValue, CborError> {
    let (value, used) = decode(data)?;
    if used != data.len() {
        return Err(CborError::TrailingBytes(data.len() - used));
    }
    Ok(value)
}

/// Decodes a top-level array of known arity into its items.
pub fn decode_fixed_array(data: &[u8], arity: usize) -> Result<Vec<CborValue>, CborError> {
    let mut reader = CborReader::new(data);
    reader.expect_array(arity)?;
    let mut items = Vec::with_capacity(arity);
    for _ in 0..arity {
        items.push(reader.read_value(1)?);
    }
    if !reader.is_empty() {
        return Err(CborError::TrailingBytes(data.len() - reader.position()));
    }
    Ok(items)
}
