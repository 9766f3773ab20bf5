//! # fil-codec
//!
//! Marshaling between EVM-style 256-bit words and the Filecoin actor wire
//! format, plus the oracle the Solidity big-number library is tested
//! against. Typed records cover market deal proposals, verified-registry
//! claim queries and miner beneficiary terms.
//!
//! The component crates are re-exported:
//!
//! - [`bigint`] - sign+magnitude integers and exact arithmetic
//! - [`cbor`] - restricted CBOR decoder and encoder
//! - [`leb128`] - unsigned varints
//! - [`address`] - ID, delegated and raw address forms
//! - [`buffers`] - checked byte reader and writer
//!
//! ## Usage
//!
//! ```sh
//! fil-codec oracle add 0x05 0x08 false true
//! fil-codec leb128 16384
//! fil-codec --network testnet address id 1000
//! ```

use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub use fil_codec_address as address;
pub use fil_codec_bigint as bigint;
pub use fil_codec_buffers as buffers;
pub use fil_codec_cbor as cbor;
pub use fil_codec_leb128 as leb128;

pub mod abi;
pub mod beneficiary;
pub mod claims;
pub mod command;
pub mod oracle;
pub mod params;

pub use beneficiary::{
    ActiveBeneficiary, BeneficiaryTerm, GetBeneficiaryReturn, PendingBeneficiaryChange,
};
pub use claims::{BatchReturn, Claim, FailCode, GetClaimsParams, GetClaimsReturn};
pub use oracle::{OracleCommand, OracleError};
pub use params::{
    sign_proposal, ClientDealProposal, DealIdSequence, DealLabel, DealProposal, NodeClient,
    ParamsError,
};

#[derive(Debug, Parser)]
#[command(name = "fil-codec", author, version, about, long_about = None)]
pub struct Cli {
    /// Log level; overrides RUST_LOG when given.
    #[arg(long, global = true)]
    pub log_level: Option<LevelFilter>,

    /// Network used for textual addresses.
    #[arg(long, global = true, value_enum, default_value_t = command::NetworkArg::Mainnet)]
    pub network: command::NetworkArg,

    #[command(subcommand)]
    pub command: command::Command,
}

/// Installs the stderr log subscriber; stdout carries only command output.
pub fn setup_logger(level: Option<LevelFilter>) -> anyhow::Result<()> {
    let filter = match level {
        Some(level) => EnvFilter::new(level.to_string()),
        None => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .from_env_lossy(),
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::IsTerminal::is_terminal(&std::io::stderr()))
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
}
