//! Verified-registry claim queries.
//!
//! `get_claims` takes `[provider, [claim_id, ...]]` and returns
//! `[batch_info, [claim, ...]]`, where `batch_info` is
//! `[success_count, [[idx, code], ...]]` and each claim is
//!
//! ```text
//! [provider, client, data, size, term_min, term_max, term_start, sector]
//! ```
//!
//! with `data` the piece CID.

use fil_codec_cbor::{CborEncoder, CborError, CborReader};

use crate::params::{finish, ParamsError};

const GET_CLAIMS_PARAMS_FIELDS: usize = 2;
const GET_CLAIMS_RETURN_FIELDS: usize = 2;
const BATCH_RETURN_FIELDS: usize = 2;
const FAIL_CODE_FIELDS: usize = 2;
const CLAIM_FIELDS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetClaimsParams {
    pub provider: u64,
    pub claim_ids: Vec<u64>,
}

impl GetClaimsParams {
    pub fn write_cbor(&self, e: &mut CborEncoder) {
        e.write_arr_hdr(GET_CLAIMS_PARAMS_FIELDS);
        e.write_u_integer(self.provider);
        e.write_arr_hdr(self.claim_ids.len());
        for id in &self.claim_ids {
            e.write_u_integer(*id);
        }
    }

    pub fn to_cbor(&self) -> Vec<u8> {
        let mut e = CborEncoder::new();
        self.write_cbor(&mut e);
        e.flush()
    }

    pub fn read_cbor(r: &mut CborReader<'_>) -> Result<Self, ParamsError> {
        r.expect_array(GET_CLAIMS_PARAMS_FIELDS)?;
        let provider = r.read_u64()?;
        let count = r.read_array_len()?;
        let claim_ids = (0..count)
            .map(|_| r.read_u64())
            .collect::<Result<_, _>>()?;
        Ok(Self {
            provider,
            claim_ids,
        })
    }

    pub fn from_cbor(data: &[u8]) -> Result<Self, ParamsError> {
        let mut r = CborReader::new(data);
        let params = Self::read_cbor(&mut r)?;
        finish(&r, data)?;
        Ok(params)
    }
}

/// Exit code for one failed entry of a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FailCode {
    /// Index of the entry in the request.
    pub idx: u32,
    pub code: u32,
}

/// Outcome of a batched actor call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReturn {
    pub success_count: u32,
    pub fail_codes: Vec<FailCode>,
}

impl BatchReturn {
    /// Number of entries in the request.
    pub fn size(&self) -> usize {
        self.success_count as usize + self.fail_codes.len()
    }

    pub fn all_ok(&self) -> bool {
        self.fail_codes.is_empty()
    }

    /// Exit code of every request entry in order, `0` for successes.
    pub fn codes(&self) -> Vec<u32> {
        let mut codes = vec![0; self.size()];
        for fail in &self.fail_codes {
            if let Some(slot) = codes.get_mut(fail.idx as usize) {
                *slot = fail.code;
            }
        }
        codes
    }

    pub fn write_cbor(&self, e: &mut CborEncoder) {
        e.write_arr_hdr(BATCH_RETURN_FIELDS);
        e.write_u_integer(self.success_count as u64);
        e.write_arr_hdr(self.fail_codes.len());
        for fail in &self.fail_codes {
            e.write_arr_hdr(FAIL_CODE_FIELDS);
            e.write_u_integer(fail.idx as u64);
            e.write_u_integer(fail.code as u64);
        }
    }

    pub fn read_cbor(r: &mut CborReader<'_>) -> Result<Self, ParamsError> {
        r.expect_array(BATCH_RETURN_FIELDS)?;
        let success_count = read_u32(r)?;
        let count = r.read_array_len()?;
        let mut fail_codes = Vec::with_capacity(count);
        for _ in 0..count {
            r.expect_array(FAIL_CODE_FIELDS)?;
            fail_codes.push(FailCode {
                idx: read_u32(r)?,
                code: read_u32(r)?,
            });
        }
        Ok(Self {
            success_count,
            fail_codes,
        })
    }
}

/// A provider's claim on verified data cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub provider: u64,
    pub client: u64,
    /// Binary CID of the claimed piece.
    pub data: Vec<u8>,
    pub size: u64,
    pub term_min: i64,
    pub term_max: i64,
    pub term_start: i64,
    pub sector: u64,
}

impl Claim {
    pub fn write_cbor(&self, e: &mut CborEncoder) {
        e.write_arr_hdr(CLAIM_FIELDS);
        e.write_u_integer(self.provider);
        e.write_u_integer(self.client);
        e.write_cid(&self.data);
        e.write_u_integer(self.size);
        e.write_integer(self.term_min);
        e.write_integer(self.term_max);
        e.write_integer(self.term_start);
        e.write_u_integer(self.sector);
    }

    pub fn read_cbor(r: &mut CborReader<'_>) -> Result<Self, ParamsError> {
        r.expect_array(CLAIM_FIELDS)?;
        Ok(Self {
            provider: r.read_u64()?,
            client: r.read_u64()?,
            data: r.read_cid()?.to_vec(),
            size: r.read_u64()?,
            term_min: r.read_i64()?,
            term_max: r.read_i64()?,
            term_start: r.read_i64()?,
            sector: r.read_u64()?,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetClaimsReturn {
    pub batch_info: BatchReturn,
    pub claims: Vec<Claim>,
}

impl GetClaimsReturn {
    pub fn write_cbor(&self, e: &mut CborEncoder) {
        e.write_arr_hdr(GET_CLAIMS_RETURN_FIELDS);
        self.batch_info.write_cbor(e);
        e.write_arr_hdr(self.claims.len());
        for claim in &self.claims {
            claim.write_cbor(e);
        }
    }

    pub fn to_cbor(&self) -> Vec<u8> {
        let mut e = CborEncoder::new();
        self.write_cbor(&mut e);
        e.flush()
    }

    pub fn read_cbor(r: &mut CborReader<'_>) -> Result<Self, ParamsError> {
        r.expect_array(GET_CLAIMS_RETURN_FIELDS)?;
        let batch_info = BatchReturn::read_cbor(r)?;
        let count = r.read_array_len()?;
        let claims = (0..count)
            .map(|_| Claim::read_cbor(r))
            .collect::<Result<_, _>>()?;
        Ok(Self { batch_info, claims })
    }

    pub fn from_cbor(data: &[u8]) -> Result<Self, ParamsError> {
        let mut r = CborReader::new(data);
        let ret = Self::read_cbor(&mut r)?;
        finish(&r, data)?;
        Ok(ret)
    }
}

fn read_u32(r: &mut CborReader<'_>) -> Result<u32, CborError> {
    u32::try_from(r.read_u64()?).map_err(|_| CborError::IntegerOverflow("u32"))
}
