//! Differential-test oracle.
//!
//! The Solidity big-number library is checked against this oracle: the
//! harness invokes it with positional string arguments and decodes the
//! ABI-encoded hex it prints. Operands are hex magnitudes with an optional
//! `0x` prefix, sign and mode flags are `true` only for the literal `true`,
//! and shift amounts are decimal. Left shifts are capped at
//! [`ops::MAX_SHIFT_BITS`].

use fil_codec_bigint::{ops, BigIntError, BigIntValue};
use fil_codec_buffers::to_hex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::abi;

const LOG_TARGET: &str = "fil_codec::oracle";

/// Error type for oracle commands.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("unknown oracle command {0:?}")]
    UnknownCommand(String),
    #[error("missing oracle command")]
    MissingCommand,
    #[error("{command} takes {expected} arguments, got {found}")]
    Arity {
        command: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid shift amount {0:?}")]
    InvalidBits(String),
    #[error(transparent)]
    BigInt(#[from] BigIntError),
}

/// Binary operations taking two signed operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedOp {
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shift {
    Left,
    Right,
}

/// A parsed oracle invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleCommand {
    Signed {
        op: SignedOp,
        a: BigIntValue,
        b: BigIntValue,
    },
    Mod {
        a: BigIntValue,
        n: BigIntValue,
    },
    ModMul {
        a: BigIntValue,
        b: BigIntValue,
        n: BigIntValue,
    },
    ModExp {
        a: BigIntValue,
        e: BigIntValue,
        n: BigIntValue,
    },
    InvMod {
        a: BigIntValue,
        m: BigIntValue,
    },
    Shift {
        dir: Shift,
        a: BigIntValue,
        bits: usize,
    },
    Cmp {
        a: BigIntValue,
        b: BigIntValue,
        signed: bool,
    },
    IsZero {
        a: BigIntValue,
    },
}

impl OracleCommand {
    /// Parses `<command> <args>...`.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, OracleError> {
        let (command, rest) = args.split_first().ok_or(OracleError::MissingCommand)?;
        let rest: Vec<&str> = rest.iter().map(|s| s.as_ref()).collect();
        let command = command.as_ref();
        match command {
            "add" | "sub" | "mul" | "div" => {
                let op = match command {
                    "add" => SignedOp::Add,
                    "sub" => SignedOp::Sub,
                    "mul" => SignedOp::Mul,
                    _ => SignedOp::Div,
                };
                let [a, b, a_neg, b_neg] = arity::<4>("add|sub|mul|div", &rest)?;
                Ok(OracleCommand::Signed {
                    op,
                    a: operand(a, a_neg)?,
                    b: operand(b, b_neg)?,
                })
            }
            "mod" => {
                let [a, n, a_neg] = arity::<3>("mod", &rest)?;
                Ok(OracleCommand::Mod {
                    a: operand(a, a_neg)?,
                    n: unsigned(n)?,
                })
            }
            "modmul" => {
                let [a, b, n, a_neg, b_neg] = arity::<5>("modmul", &rest)?;
                Ok(OracleCommand::ModMul {
                    a: operand(a, a_neg)?,
                    b: operand(b, b_neg)?,
                    n: unsigned(n)?,
                })
            }
            "modexp" => {
                let [a, e, n] = arity::<3>("modexp", &rest)?;
                Ok(OracleCommand::ModExp {
                    a: unsigned(a)?,
                    e: unsigned(e)?,
                    n: unsigned(n)?,
                })
            }
            "invmod" => {
                let [a, m] = arity::<2>("invmod", &rest)?;
                Ok(OracleCommand::InvMod {
                    a: unsigned(a)?,
                    m: unsigned(m)?,
                })
            }
            "shl" | "shr" => {
                let dir = if command == "shl" {
                    Shift::Left
                } else {
                    Shift::Right
                };
                let [a, bits] = arity::<2>("shl|shr", &rest)?;
                Ok(OracleCommand::Shift {
                    dir,
                    a: unsigned(a)?,
                    bits: bits
                        .parse()
                        .map_err(|_| OracleError::InvalidBits(bits.to_string()))?,
                })
            }
            "cmp" => {
                let [a, b, a_neg, b_neg, signed] = arity::<5>("cmp", &rest)?;
                Ok(OracleCommand::Cmp {
                    a: operand(a, a_neg)?,
                    b: operand(b, b_neg)?,
                    signed: flag(signed),
                })
            }
            "iszero" => {
                let [a, a_neg] = arity::<2>("iszero", &rest)?;
                Ok(OracleCommand::IsZero {
                    a: operand(a, a_neg)?,
                })
            }
            other => Err(OracleError::UnknownCommand(other.to_string())),
        }
    }

    /// Runs the command and returns the ABI-encoded result.
    pub fn execute(&self) -> Result<Vec<u8>, OracleError> {
        let out = match self {
            OracleCommand::Signed { op, a, b } => {
                let r = match op {
                    SignedOp::Add => ops::add(a, b),
                    SignedOp::Sub => ops::sub(a, b),
                    SignedOp::Mul => ops::mul(a, b),
                    SignedOp::Div => ops::div(a, b)?,
                };
                abi::encode_signed_result(&r)
            }
            OracleCommand::Mod { a, n } => abi::encode_signed_result(&ops::modulo(a, n)?),
            OracleCommand::ModMul { a, b, n } => {
                abi::encode_signed_result(&ops::modmul(a, b, n)?)
            }
            OracleCommand::ModExp { a, e, n } => {
                abi::encode_signed_result(&ops::modexp(a, e, n)?)
            }
            OracleCommand::InvMod { a, m } => {
                let r = ops::invmod(a, m)?;
                abi::encode_bool_bool_bytes(
                    r.valid,
                    r.value.is_negative(),
                    &abi::result_bytes(&r.value),
                )
            }
            OracleCommand::Shift { dir, a, bits } => {
                let r = match dir {
                    Shift::Left => ops::shl(a, *bits)?,
                    Shift::Right => ops::shr(a, *bits),
                };
                abi::encode_signed_result(&r)
            }
            OracleCommand::Cmp { a, b, signed } => {
                abi::encode_int256(&BigIntValue::from(ops::cmp(a, b, *signed)))?
            }
            OracleCommand::IsZero { a } => abi::encode_bool(ops::is_zero(a)),
        };
        Ok(out)
    }
}

/// Parses and runs one oracle invocation, returning `0x`-prefixed hex.
pub fn run<S: AsRef<str>>(args: &[S]) -> Result<String, OracleError> {
    let command = OracleCommand::parse(args).inspect_err(|err| {
        warn!(target: LOG_TARGET, %err, "rejected oracle arguments");
    })?;
    debug!(target: LOG_TARGET, ?command, "dispatching oracle command");
    let out = command.execute().inspect_err(|err| {
        warn!(target: LOG_TARGET, %err, "oracle command failed");
    })?;
    Ok(to_hex(&out))
}

fn arity<'a, const N: usize>(
    command: &'static str,
    args: &[&'a str],
) -> Result<[&'a str; N], OracleError> {
    args.try_into().map_err(|_| OracleError::Arity {
        command,
        expected: N,
        found: args.len(),
    })
}

fn flag(s: &str) -> bool {
    s == "true"
}

fn unsigned(hex: &str) -> Result<BigIntValue, OracleError> {
    Ok(BigIntValue::from_hex(hex, false)?)
}

fn operand(hex: &str, neg: &str) -> Result<BigIntValue, OracleError> {
    Ok(BigIntValue::from_hex(hex, flag(neg))?)
}
