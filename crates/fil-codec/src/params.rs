//! Storage-market deal parameters in the actor's CBOR tuple layout.
//!
//! `DealProposal` is an 11-element array:
//!
//! ```text
//! [piece_cid, piece_size, verified_deal, client, provider, label,
//!  start_epoch, end_epoch, storage_price_per_epoch,
//!  provider_collateral, client_collateral]
//! ```
//!
//! and `ClientDealProposal` is `[proposal, client_signature]`. Addresses are
//! byte strings of their protocol-prefixed form and token amounts are
//! Filecoin BigInt bytes.

use fil_codec_address::{AddressError, FilAddress};
use fil_codec_bigint::{ops, BigIntValue};
use fil_codec_cbor::{CborEncoder, CborError, CborReader, CborValue};
use thiserror::Error;

const DEAL_PROPOSAL_FIELDS: usize = 11;
const CLIENT_DEAL_PROPOSAL_FIELDS: usize = 2;

/// Error type for parameter decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParamsError {
    #[error(transparent)]
    Cbor(#[from] CborError),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error("{field}: expected text or byte string, found {found}")]
    InvalidLabel {
        field: &'static str,
        found: &'static str,
    },
}

/// Deal label; the actor keeps text and raw bytes apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DealLabel {
    String(String),
    Bytes(Vec<u8>),
}

impl Default for DealLabel {
    fn default() -> Self {
        DealLabel::String(String::new())
    }
}

impl DealLabel {
    fn write(&self, e: &mut CborEncoder) {
        match self {
            DealLabel::String(s) => e.write_str(s),
            DealLabel::Bytes(b) => e.write_bin(b),
        }
    }

    fn read(r: &mut CborReader<'_>) -> Result<Self, ParamsError> {
        match r.read_any()? {
            CborValue::TextString(s) => Ok(DealLabel::String(s)),
            CborValue::ByteString(b) => Ok(DealLabel::Bytes(b)),
            other => Err(ParamsError::InvalidLabel {
                field: "label",
                found: other.type_name(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealProposal {
    /// Binary CID of the piece.
    pub piece_cid: Vec<u8>,
    pub piece_size: u64,
    pub verified_deal: bool,
    pub client: FilAddress,
    pub provider: FilAddress,
    pub label: DealLabel,
    pub start_epoch: i64,
    pub end_epoch: i64,
    pub storage_price_per_epoch: BigIntValue,
    pub provider_collateral: BigIntValue,
    pub client_collateral: BigIntValue,
}

impl DealProposal {
    /// Price of the whole deal: `(end_epoch - start_epoch) * price_per_epoch`.
    pub fn total_price(&self) -> BigIntValue {
        let duration = BigIntValue::from(self.end_epoch as i128 - self.start_epoch as i128);
        ops::mul(&duration, &self.storage_price_per_epoch)
    }

    pub fn write_cbor(&self, e: &mut CborEncoder) {
        e.write_arr_hdr(DEAL_PROPOSAL_FIELDS);
        e.write_cid(&self.piece_cid);
        e.write_u_integer(self.piece_size);
        e.write_boolean(self.verified_deal);
        e.write_bin(&self.client.to_bytes());
        e.write_bin(&self.provider.to_bytes());
        self.label.write(e);
        e.write_integer(self.start_epoch);
        e.write_integer(self.end_epoch);
        e.write_big_int(&self.storage_price_per_epoch);
        e.write_big_int(&self.provider_collateral);
        e.write_big_int(&self.client_collateral);
    }

    pub fn to_cbor(&self) -> Vec<u8> {
        let mut e = CborEncoder::new();
        self.write_cbor(&mut e);
        e.flush()
    }

    pub fn read_cbor(r: &mut CborReader<'_>) -> Result<Self, ParamsError> {
        r.expect_array(DEAL_PROPOSAL_FIELDS)?;
        Ok(Self {
            piece_cid: r.read_cid()?.to_vec(),
            piece_size: r.read_u64()?,
            verified_deal: r.read_bool()?,
            client: FilAddress::from_bytes(r.read_bytes()?)?,
            provider: FilAddress::from_bytes(r.read_bytes()?)?,
            label: DealLabel::read(r)?,
            start_epoch: r.read_i64()?,
            end_epoch: r.read_i64()?,
            storage_price_per_epoch: r.read_big_int()?,
            provider_collateral: r.read_big_int()?,
            client_collateral: r.read_big_int()?,
        })
    }

    pub fn from_cbor(data: &[u8]) -> Result<Self, ParamsError> {
        let mut r = CborReader::new(data);
        let proposal = Self::read_cbor(&mut r)?;
        finish(&r, data)?;
        Ok(proposal)
    }

    /// Replaces client and provider with their ID addresses.
    pub fn with_id_addresses<C: NodeClient>(mut self, node: &C) -> Result<Self, C::Error> {
        self.client = FilAddress::Id(node.lookup_id(&self.client)?);
        self.provider = FilAddress::Id(node.lookup_id(&self.provider)?);
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDealProposal {
    pub proposal: DealProposal,
    /// Signature bytes: one type byte followed by the signature data.
    pub client_signature: Vec<u8>,
}

impl ClientDealProposal {
    pub fn to_cbor(&self) -> Vec<u8> {
        let mut e = CborEncoder::new();
        e.write_arr_hdr(CLIENT_DEAL_PROPOSAL_FIELDS);
        self.proposal.write_cbor(&mut e);
        e.write_bin(&self.client_signature);
        e.flush()
    }

    pub fn from_cbor(data: &[u8]) -> Result<Self, ParamsError> {
        let mut r = CborReader::new(data);
        r.expect_array(CLIENT_DEAL_PROPOSAL_FIELDS)?;
        let proposal = DealProposal::read_cbor(&mut r)?;
        let client_signature = r.read_bytes()?.to_vec();
        finish(&r, data)?;
        Ok(Self {
            proposal,
            client_signature,
        })
    }
}

pub(crate) fn finish(r: &CborReader<'_>, data: &[u8]) -> Result<(), CborError> {
    if !r.is_empty() {
        return Err(CborError::TrailingBytes(data.len() - r.position()));
    }
    Ok(())
}

/// Monotonic deal identifier source, owned by whoever issues deals.
///
/// Yields `start, start + 1, ...` and ends after `u64::MAX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealIdSequence {
    next: Option<u64>,
}

impl DealIdSequence {
    pub fn new(start: u64) -> Self {
        Self { next: Some(start) }
    }

    /// The id the next call to [`Iterator::next`] returns.
    pub fn peek(&self) -> Option<u64> {
        self.next
    }
}

impl Default for DealIdSequence {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Iterator for DealIdSequence {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }
}

/// Chain node operations a deal client needs.
pub trait NodeClient {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Signs `message` with the key behind `address`.
    fn sign(&self, address: &FilAddress, message: &[u8]) -> Result<Vec<u8>, Self::Error>;

    /// Actor id that `address` refers to.
    fn lookup_id(&self, address: &FilAddress) -> Result<u64, Self::Error>;
}

/// Signs the CBOR form of `proposal` with the client's key.
pub fn sign_proposal<C: NodeClient>(
    node: &C,
    proposal: DealProposal,
) -> Result<ClientDealProposal, C::Error> {
    let client_signature = node.sign(&proposal.client, &proposal.to_cbor())?;
    Ok(ClientDealProposal {
        proposal,
        client_signature,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fil_codec_address::eth_to_delegated;

    fn proposal() -> DealProposal {
        DealProposal {
            piece_cid: vec![0x01, 0x55],
            piece_size: 1024,
            verified_deal: false,
            client: FilAddress::Id(1000),
            provider: FilAddress::Id(1001),
            label: DealLabel::String("a".into()),
            start_epoch: 10_000,
            end_epoch: 20_000,
            storage_price_per_epoch: BigIntValue::from(1u8),
            provider_collateral: BigIntValue::from(1_000_000u32),
            client_collateral: BigIntValue::zero(),
        }
    }

    #[test]
    fn test_deal_proposal_bytes() {
        let expected = vec![
            0x8b, // array(11)
            0xd8, 0x2a, 0x43, 0x00, 0x01, 0x55, // cid
            0x19, 0x04, 0x00, // piece_size
            0xf4, // verified_deal
            0x43, 0x00, 0xe8, 0x07, // client
            0x43, 0x00, 0xe9, 0x07, // provider
            0x61, 0x61, // label
            0x19, 0x27, 0x10, // start_epoch
            0x19, 0x4e, 0x20, // end_epoch
            0x42, 0x00, 0x01, // price
            0x44, 0x00, 0x0f, 0x42, 0x40, // provider collateral
            0x40, // client collateral
        ];
        let p = proposal();
        assert_eq!(p.to_cbor(), expected);
        assert_eq!(DealProposal::from_cbor(&expected), Ok(p));
    }

    #[test]
    fn test_total_price() {
        let mut p = proposal();
        assert_eq!(p.total_price(), BigIntValue::from(10_000u32));
        p.storage_price_per_epoch = BigIntValue::from(-3i8);
        p.start_epoch = -5;
        p.end_epoch = 5;
        assert_eq!(p.total_price(), BigIntValue::from(-30i8));
    }

    #[test]
    fn test_byte_label_and_negative_epoch() {
        let mut p = proposal();
        p.label = DealLabel::Bytes(vec![0xde, 0xad]);
        p.start_epoch = -1;
        p.provider = eth_to_delegated([0x22; 20]);
        assert_eq!(DealProposal::from_cbor(&p.to_cbor()), Ok(p));
    }

    #[test]
    fn test_label_type_checked() {
        let mut bytes = proposal().to_cbor();
        let at = bytes.iter().position(|&b| b == 0x61).unwrap();
        bytes[at] = 0xf6;
        bytes.remove(at + 1);
        assert_eq!(
            DealProposal::from_cbor(&bytes),
            Err(ParamsError::InvalidLabel {
                field: "label",
                found: "null"
            })
        );
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = proposal().to_cbor();
        bytes.push(0x00);
        assert_eq!(
            DealProposal::from_cbor(&bytes),
            Err(ParamsError::Cbor(CborError::TrailingBytes(1)))
        );
    }

    #[test]
    fn test_deal_id_sequence() {
        let mut ids = DealIdSequence::new(7);
        assert_eq!(ids.peek(), Some(7));
        assert_eq!(ids.next(), Some(7));
        assert_eq!(ids.next(), Some(8));

        let mut last = DealIdSequence::new(u64::MAX);
        assert_eq!(last.next(), Some(u64::MAX));
        assert_eq!(last.next(), None);
        assert_eq!(DealIdSequence::default().next(), Some(0));
    }
}
