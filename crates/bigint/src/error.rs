use thiserror::Error;

/// Error type for big integer conversion and arithmetic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BigIntError {
    #[error("value out of range for {0}")]
    OutOfRange(&'static str),
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid hex magnitude: {0}")]
    InvalidHex(String),
    #[error("invalid sign byte {0:#04x}")]
    InvalidSignByte(u8),
    #[error("shift of {0} bits exceeds the supported maximum")]
    ShiftTooLarge(usize),
}
