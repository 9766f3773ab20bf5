//! [`FilAddress`] and its protocol-prefixed byte form.

use fil_codec_buffers::Reader;
use fil_codec_leb128::{decode_u64, encode_u64};

use crate::{AddressError, BLS_PUB_LEN, MAX_SUBADDRESS_LEN, PAYLOAD_HASH_LEN};

/// Address protocol carried in the first byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Protocol {
    Id = 0,
    Secp256k1 = 1,
    Actor = 2,
    Bls = 3,
    Delegated = 4,
}

impl TryFrom<u8> for Protocol {
    type Error = AddressError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            0 => Ok(Protocol::Id),
            1 => Ok(Protocol::Secp256k1),
            2 => Ok(Protocol::Actor),
            3 => Ok(Protocol::Bls),
            4 => Ok(Protocol::Delegated),
            other => Err(AddressError::UnsupportedProtocol(other)),
        }
    }
}

/// A decoded address.
///
/// `Bytes` holds the raw protocol-prefixed form of protocols 1, 2 and 3,
/// whose payloads are opaque hashes or keys to this crate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FilAddress {
    Id(u64),
    Delegated { namespace: u64, sub_address: Vec<u8> },
    Bytes(Vec<u8>),
}

impl FilAddress {
    /// Builds a delegated address, checking the sub-address length.
    pub fn delegated(namespace: u64, sub_address: Vec<u8>) -> Result<Self, AddressError> {
        if sub_address.len() > MAX_SUBADDRESS_LEN {
            return Err(AddressError::MalformedAddress(format!(
                "delegated sub-address of {} bytes exceeds {MAX_SUBADDRESS_LEN}",
                sub_address.len()
            )));
        }
        Ok(FilAddress::Delegated {
            namespace,
            sub_address,
        })
    }

    /// Parses the protocol-prefixed byte form; the payload must be consumed
    /// exactly.
    pub fn from_bytes(data: &[u8]) -> Result<Self, AddressError> {
        if data.is_empty() {
            return Err(AddressError::Empty);
        }
        let mut reader = Reader::new(data);
        let protocol = Protocol::try_from(reader.u8()?)?;
        let payload = reader.rest();
        match protocol {
            Protocol::Id => {
                let (id, used) = decode_u64(payload)?;
                if used != payload.len() {
                    return Err(AddressError::MalformedAddress(format!(
                        "{} trailing bytes after actor id",
                        payload.len() - used
                    )));
                }
                Ok(FilAddress::Id(id))
            }
            Protocol::Secp256k1 | Protocol::Actor => {
                expect_len(protocol, payload, PAYLOAD_HASH_LEN)?;
                Ok(FilAddress::Bytes(data.to_vec()))
            }
            Protocol::Bls => {
                expect_len(protocol, payload, BLS_PUB_LEN)?;
                Ok(FilAddress::Bytes(data.to_vec()))
            }
            Protocol::Delegated => {
                let (namespace, used) = decode_u64(payload)?;
                Self::delegated(namespace, payload[used..].to_vec())
            }
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            FilAddress::Id(id) => {
                let mut out = vec![Protocol::Id as u8];
                out.extend(encode_u64(*id));
                out
            }
            FilAddress::Delegated {
                namespace,
                sub_address,
            } => {
                let mut out = vec![Protocol::Delegated as u8];
                out.extend(encode_u64(*namespace));
                out.extend_from_slice(sub_address);
                out
            }
            FilAddress::Bytes(bytes) => bytes.clone(),
        }
    }

    /// Protocol of the address; fails only for a hand-built `Bytes` value
    /// with an empty or unknown prefix.
    pub fn protocol(&self) -> Result<Protocol, AddressError> {
        match self {
            FilAddress::Id(_) => Ok(Protocol::Id),
            FilAddress::Delegated { .. } => Ok(Protocol::Delegated),
            FilAddress::Bytes(bytes) => match bytes.first() {
                Some(&byte) => Protocol::try_from(byte),
                None => Err(AddressError::Empty),
            },
        }
    }

    pub fn id(&self) -> Option<u64> {
        match self {
            FilAddress::Id(id) => Some(*id),
            _ => None,
        }
    }
}

fn expect_len(protocol: Protocol, payload: &[u8], len: usize) -> Result<(), AddressError> {
    if payload.len() != len {
        return Err(AddressError::MalformedAddress(format!(
            "{protocol:?} payload must be {len} bytes, got {}",
            payload.len()
        )));
    }
    Ok(())
}
