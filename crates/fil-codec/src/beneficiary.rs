//! Miner beneficiary records.
//!
//! `get_beneficiary` returns `[active, proposed]`: `active` is
//! `[beneficiary, [quota, used_quota, expiration]]` and `proposed` is either
//! `null` or
//!
//! ```text
//! [new_beneficiary, new_quota, new_expiration,
//!  approved_by_beneficiary, approved_by_nominee]
//! ```

use fil_codec_address::FilAddress;
use fil_codec_bigint::{ops, BigIntValue};
use fil_codec_cbor::{CborEncoder, CborReader};

use crate::params::{finish, ParamsError};

const TERM_FIELDS: usize = 3;
const ACTIVE_FIELDS: usize = 2;
const PENDING_FIELDS: usize = 5;
const RETURN_FIELDS: usize = 2;

/// How much a beneficiary may withdraw and until when.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeneficiaryTerm {
    pub quota: BigIntValue,
    pub used_quota: BigIntValue,
    pub expiration: i64,
}

impl BeneficiaryTerm {
    /// Quota still available at `epoch`; zero once the term has expired or
    /// the quota is used up.
    pub fn available(&self, epoch: i64) -> BigIntValue {
        if self.expiration <= epoch {
            return BigIntValue::zero();
        }
        let left = ops::sub(&self.quota, &self.used_quota);
        if left.is_negative() {
            BigIntValue::zero()
        } else {
            left
        }
    }

    pub fn is_used_up(&self) -> bool {
        ops::cmp(&self.used_quota, &self.quota, true) >= 0
    }

    pub fn write_cbor(&self, e: &mut CborEncoder) {
        e.write_arr_hdr(TERM_FIELDS);
        e.write_big_int(&self.quota);
        e.write_big_int(&self.used_quota);
        e.write_integer(self.expiration);
    }

    pub fn read_cbor(r: &mut CborReader<'_>) -> Result<Self, ParamsError> {
        r.expect_array(TERM_FIELDS)?;
        Ok(Self {
            quota: r.read_big_int()?,
            used_quota: r.read_big_int()?,
            expiration: r.read_i64()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveBeneficiary {
    pub beneficiary: FilAddress,
    pub term: BeneficiaryTerm,
}

impl ActiveBeneficiary {
    pub fn write_cbor(&self, e: &mut CborEncoder) {
        e.write_arr_hdr(ACTIVE_FIELDS);
        e.write_bin(&self.beneficiary.to_bytes());
        self.term.write_cbor(e);
    }

    pub fn read_cbor(r: &mut CborReader<'_>) -> Result<Self, ParamsError> {
        r.expect_array(ACTIVE_FIELDS)?;
        Ok(Self {
            beneficiary: FilAddress::from_bytes(r.read_bytes()?)?,
            term: BeneficiaryTerm::read_cbor(r)?,
        })
    }
}

/// A proposed beneficiary change awaiting approval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingBeneficiaryChange {
    pub new_beneficiary: FilAddress,
    pub new_quota: BigIntValue,
    pub new_expiration: i64,
    pub approved_by_beneficiary: bool,
    pub approved_by_nominee: bool,
}

impl PendingBeneficiaryChange {
    pub fn write_cbor(&self, e: &mut CborEncoder) {
        e.write_arr_hdr(PENDING_FIELDS);
        e.write_bin(&self.new_beneficiary.to_bytes());
        e.write_big_int(&self.new_quota);
        e.write_integer(self.new_expiration);
        e.write_boolean(self.approved_by_beneficiary);
        e.write_boolean(self.approved_by_nominee);
    }

    pub fn read_cbor(r: &mut CborReader<'_>) -> Result<Self, ParamsError> {
        r.expect_array(PENDING_FIELDS)?;
        Ok(Self {
            new_beneficiary: FilAddress::from_bytes(r.read_bytes()?)?,
            new_quota: r.read_big_int()?,
            new_expiration: r.read_i64()?,
            approved_by_beneficiary: r.read_bool()?,
            approved_by_nominee: r.read_bool()?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetBeneficiaryReturn {
    pub active: ActiveBeneficiary,
    pub proposed: Option<PendingBeneficiaryChange>,
}

impl GetBeneficiaryReturn {
    pub fn to_cbor(&self) -> Vec<u8> {
        let mut e = CborEncoder::new();
        e.write_arr_hdr(RETURN_FIELDS);
        self.active.write_cbor(&mut e);
        match &self.proposed {
            Some(change) => change.write_cbor(&mut e),
            None => e.write_null(),
        }
        e.flush()
    }

    pub fn from_cbor(data: &[u8]) -> Result<Self, ParamsError> {
        let mut r = CborReader::new(data);
        r.expect_array(RETURN_FIELDS)?;
        let active = ActiveBeneficiary::read_cbor(&mut r)?;
        let proposed = if r.is_null_next()? {
            r.read_null()?;
            None
        } else {
            Some(PendingBeneficiaryChange::read_cbor(&mut r)?)
        };
        finish(&r, data)?;
        Ok(Self { active, proposed })
    }
}
