//! Filecoin address byte forms.
//!
//! An address on the wire is a one-byte protocol prefix followed by a
//! protocol-specific payload:
//!
//! | protocol | meaning        | payload                                        |
//! |----------|----------------|------------------------------------------------|
//! | 0        | ID             | ULEB128 actor id                               |
//! | 1        | secp256k1      | 20-byte key hash                               |
//! | 2        | actor          | 20-byte hash                                   |
//! | 3        | BLS            | 48-byte public key                             |
//! | 4        | delegated      | ULEB128 namespace, then up to 54 bytes         |
//!
//! Namespace 10 under protocol 4 embeds a 20-byte Ethereum address.
//!
//! # Example
//!
//! ```
//! use fil_codec_address::{bigint_to_id, eth_to_delegated, delegated_to_eth, id_to_bigint};
//!
//! let bytes = bigint_to_id(1000);
//! assert_eq!(bytes, vec![0x00, 0xe8, 0x07]);
//! assert_eq!(id_to_bigint(&bytes).unwrap(), 1000);
//!
//! let eth = [0x11; 20];
//! let addr = eth_to_delegated(eth);
//! assert_eq!(delegated_to_eth(&addr).unwrap(), eth);
//! ```

mod address;
mod convert;
mod directory;
mod network;

pub use address::{FilAddress, Protocol};
pub use convert::{bigint_to_id, delegated_to_eth, eth_to_delegated, id_to_bigint};
pub use directory::{resolve, ActorDirectory, InMemoryDirectory};
pub use network::Network;

use fil_codec_buffers::BufferError;
use fil_codec_leb128::Leb128Error;
use thiserror::Error;

/// Namespace of the Ethereum address manager under protocol 4.
pub const EAM_NAMESPACE: u64 = 10;

/// Length of an Ethereum address.
pub const ETH_ADDRESS_LEN: usize = 20;

/// Payload length of secp256k1 and actor addresses.
pub const PAYLOAD_HASH_LEN: usize = 20;

/// Payload length of BLS addresses.
pub const BLS_PUB_LEN: usize = 48;

/// Longest sub-address a delegated address may carry.
pub const MAX_SUBADDRESS_LEN: usize = 54;

/// Error type for address conversions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("unsupported address protocol {0}")]
    UnsupportedProtocol(u8),
    #[error("malformed address: {0}")]
    MalformedAddress(String),
    #[error("empty address")]
    Empty,
    #[error("address is not an ethereum delegated address")]
    NotEthereum,
}

impl From<Leb128Error> for AddressError {
    fn from(err: Leb128Error) -> Self {
        AddressError::MalformedAddress(err.to_string())
    }
}

impl From<BufferError> for AddressError {
    fn from(err: BufferError) -> Self {
        AddressError::MalformedAddress(err.to_string())
    }
}
