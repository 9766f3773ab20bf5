//! Conversions between addresses and the scalar values contracts hold.

use crate::{AddressError, FilAddress, Protocol, EAM_NAMESPACE, ETH_ADDRESS_LEN};

/// Extracts the actor id from an ID address byte form.
pub fn id_to_bigint(address: &[u8]) -> Result<u64, AddressError> {
    match FilAddress::from_bytes(address)? {
        FilAddress::Id(id) => Ok(id),
        _ => match address.first() {
            Some(&byte) => Err(AddressError::UnsupportedProtocol(byte)),
            None => Err(AddressError::Empty),
        },
    }
}

/// Byte form of the ID address for `id`.
pub fn bigint_to_id(id: u64) -> Vec<u8> {
    FilAddress::Id(id).to_bytes()
}

/// Embeds an Ethereum address under the Ethereum address manager namespace.
pub fn eth_to_delegated(eth: [u8; ETH_ADDRESS_LEN]) -> FilAddress {
    FilAddress::Delegated {
        namespace: EAM_NAMESPACE,
        sub_address: eth.to_vec(),
    }
}

/// Recovers the Ethereum address embedded in a namespace-10 delegated
/// address.
///
/// A namespace-10 sub-address that is not exactly 20 bytes is
/// [`AddressError::MalformedAddress`]; other namespaces and protocols are
/// [`AddressError::NotEthereum`].
pub fn delegated_to_eth(address: &FilAddress) -> Result<[u8; ETH_ADDRESS_LEN], AddressError> {
    match address {
        FilAddress::Delegated {
            namespace: EAM_NAMESPACE,
            sub_address,
        } => sub_address
            .as_slice()
            .try_into()
            .map_err(|_| {
                AddressError::MalformedAddress(format!(
                    "ethereum sub-address must be {ETH_ADDRESS_LEN} bytes, got {}",
                    sub_address.len()
                ))
            }),
        FilAddress::Bytes(bytes) if bytes.first() == Some(&(Protocol::Delegated as u8)) => {
            delegated_to_eth(&FilAddress::from_bytes(bytes)?)
        }
        _ => Err(AddressError::NotEthereum),
    }
}
