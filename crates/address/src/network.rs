//! Network prefixes for the textual ID address form.

use std::fmt;

use crate::{AddressError, FilAddress};

/// Chain network; selects the `f`/`t` prefix of address strings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn prefix(self) -> char {
        match self {
            Network::Mainnet => 'f',
            Network::Testnet => 't',
        }
    }

    /// Formats an ID address as `f0<id>` or `t0<id>`.
    pub fn format_id(self, id: u64) -> String {
        format!("{}0{id}", self.prefix())
    }

    /// Formats an address; only ID addresses have a checksum-free string
    /// form, so other protocols fail.
    pub fn format(self, address: &FilAddress) -> Result<String, AddressError> {
        match address {
            FilAddress::Id(id) => Ok(self.format_id(*id)),
            other => Err(AddressError::UnsupportedProtocol(other.protocol()? as u8)),
        }
    }

    /// Parses `f0<id>` / `t0<id>` for this network.
    pub fn parse_id(self, s: &str) -> Result<u64, AddressError> {
        let digits = s
            .strip_prefix(self.prefix())
            .and_then(|rest| rest.strip_prefix('0'))
            .ok_or_else(|| AddressError::MalformedAddress(format!("not a {self} id address: {s}")))?;
        if digits.is_empty()
            || !digits.bytes().all(|b| b.is_ascii_digit())
            || (digits.len() > 1 && digits.starts_with('0'))
        {
            return Err(AddressError::MalformedAddress(format!(
                "invalid actor id in {s}"
            )));
        }
        digits
            .parse()
            .map_err(|_| AddressError::MalformedAddress(format!("actor id out of range in {s}")))
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => f.write_str("mainnet"),
            Network::Testnet => f.write_str("testnet"),
        }
    }
}
