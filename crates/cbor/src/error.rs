use fil_codec_bigint::BigIntError;
use fil_codec_buffers::BufferError;
use thiserror::Error;

/// Error type for CBOR encoding/decoding operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CborError {
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },
    #[error("unsupported cbor initial byte {initial_byte:#04x}")]
    UnsupportedType { initial_byte: u8 },
    #[error("invalid UTF-8 in text string")]
    InvalidEncoding,
    #[error("expected {expected}, found initial byte {initial_byte:#04x}")]
    UnexpectedType {
        expected: &'static str,
        initial_byte: u8,
    },
    #[error("expected array of {expected} items, found {found}")]
    ArityMismatch { expected: usize, found: usize },
    #[error("{0} trailing bytes after top-level item")]
    TrailingBytes(usize),
    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("integer does not fit in {0}")]
    IntegerOverflow(&'static str),
    #[error("invalid big integer: {0}")]
    BigInt(#[from] BigIntError),
}

impl From<BufferError> for CborError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer { needed, remaining } => {
                CborError::TruncatedInput { needed, remaining }
            }
            BufferError::InvalidUtf8 | BufferError::InvalidHex(_) => CborError::InvalidEncoding,
        }
    }
}
