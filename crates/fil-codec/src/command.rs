use anyhow::{bail, Context};
use clap::{Subcommand, ValueEnum};
use num_bigint::BigUint;
use tracing::debug;

use fil_codec_address::{eth_to_delegated, FilAddress, Network, ETH_ADDRESS_LEN};
use fil_codec_buffers::{from_hex, print_octets, to_hex};
use fil_codec_cbor::decode_exact;
use fil_codec_leb128::encode_unsigned;

use crate::oracle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NetworkArg {
    Mainnet,
    Testnet,
}

impl From<NetworkArg> for Network {
    fn from(arg: NetworkArg) -> Self {
        match arg {
            NetworkArg::Mainnet => Network::Mainnet,
            NetworkArg::Testnet => Network::Testnet,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run one differential-oracle operation and print its ABI-encoded result.
    Oracle {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
    /// Encode a decimal integer as unsigned LEB128.
    Leb128 { value: String },
    /// Decode one hex-encoded CBOR item.
    Cbor { hex: String },
    /// Address conversions.
    #[command(subcommand)]
    Address(AddressCommand),
}

#[derive(Debug, Subcommand)]
pub enum AddressCommand {
    /// Byte form of an ID address.
    Id { id: u64 },
    /// Delegated (namespace 10) form of a 20-byte Ethereum address.
    Eth { hex: String },
    /// Describe a hex-encoded address.
    Parse { hex: String },
}

/// Runs a command and returns what should be printed on stdout.
pub fn handle_command(cmd: Command, network: Network) -> anyhow::Result<String> {
    match cmd {
        Command::Oracle { args } => Ok(oracle::run(args.as_slice())?),
        Command::Leb128 { value } => {
            let value: BigUint = value
                .parse()
                .with_context(|| format!("invalid unsigned decimal {value:?}"))?;
            Ok(to_hex(&encode_unsigned(&value)))
        }
        Command::Cbor { hex } => {
            let bytes = from_hex(&hex)?;
            debug!(len = bytes.len(), octets = %print_octets(&bytes, 16), "decoding cbor");
            Ok(format!("{:#?}", decode_exact(&bytes)?))
        }
        Command::Address(cmd) => handle_address(cmd, network),
    }
}

fn handle_address(cmd: AddressCommand, network: Network) -> anyhow::Result<String> {
    match cmd {
        AddressCommand::Id { id } => {
            let addr = FilAddress::Id(id);
            Ok(format!("{} {}", network.format_id(id), to_hex(&addr.to_bytes())))
        }
        AddressCommand::Eth { hex } => {
            let bytes = from_hex(&hex)?;
            let Ok(eth) = <[u8; ETH_ADDRESS_LEN]>::try_from(bytes.as_slice()) else {
                bail!("ethereum address must be {ETH_ADDRESS_LEN} bytes, got {}", bytes.len());
            };
            Ok(to_hex(&eth_to_delegated(eth).to_bytes()))
        }
        AddressCommand::Parse { hex } => {
            let addr = FilAddress::from_bytes(&from_hex(&hex)?)?;
            let protocol = addr.protocol()?;
            Ok(match &addr {
                FilAddress::Id(id) => format!("{protocol:?} {}", network.format_id(*id)),
                FilAddress::Delegated {
                    namespace,
                    sub_address,
                } => format!(
                    "{protocol:?} namespace={namespace} sub_address={}",
                    to_hex(sub_address)
                ),
                FilAddress::Bytes(bytes) => {
                    format!("{protocol:?} payload={}", to_hex(&bytes[1..]))
                }
            })
        }
    }
}
