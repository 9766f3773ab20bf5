//! [`CborValue`]: decoded item of the supported CBOR subset.

/// A decoded CBOR item.
///
/// `NegativeInt(n)` stores the encoded argument, so it denotes `-(1 + n)`;
/// use [`CborValue::as_i128`] for the numeric value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CborValue {
    UnsignedInt(u64),
    NegativeInt(u64),
    Bool(bool),
    Null,
    ByteString(Vec<u8>),
    TextString(String),
    FixedArray(Vec<CborValue>),
    Map(Vec<(CborValue, CborValue)>),
}

impl CborValue {
    /// Builds the integer item for any value in `[-2^64, 2^64)`.
    pub fn from_i128(value: i128) -> Option<Self> {
        if value >= 0 {
            u64::try_from(value).ok().map(CborValue::UnsignedInt)
        } else {
            u64::try_from(-1 - value).ok().map(CborValue::NegativeInt)
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CborValue::UnsignedInt(_) => "unsigned integer",
            CborValue::NegativeInt(_) => "negative integer",
            CborValue::Bool(_) => "bool",
            CborValue::Null => "null",
            CborValue::ByteString(_) => "byte string",
            CborValue::TextString(_) => "text string",
            CborValue::FixedArray(_) => "array",
            CborValue::Map(_) => "map",
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            CborValue::UnsignedInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Numeric value of either integer major type.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            CborValue::UnsignedInt(u) => Some(*u as i128),
            CborValue::NegativeInt(n) => Some(-1 - *n as i128),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CborValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CborValue::Null)
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            CborValue::ByteString(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CborValue::TextString(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[CborValue]> {
        match self {
            CborValue::FixedArray(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[(CborValue, CborValue)]> {
        match self {
            CborValue::Map(entries) => Some(entries),
            _ => None,
        }
    }
}

impl From<u64> for CborValue {
    fn from(value: u64) -> Self {
        CborValue::UnsignedInt(value)
    }
}

impl From<i64> for CborValue {
    fn from(value: i64) -> Self {
        if value >= 0 {
            CborValue::UnsignedInt(value as u64)
        } else {
            CborValue::NegativeInt((-1 - value) as u64)
        }
    }
}

impl From<bool> for CborValue {
    fn from(value: bool) -> Self {
        CborValue::Bool(value)
    }
}

impl From<&str> for CborValue {
    fn from(value: &str) -> Self {
        CborValue::TextString(value.to_owned())
    }
}

impl From<Vec<u8>> for CborValue {
    fn from(value: Vec<u8>) -> Self {
        CborValue::ByteString(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_int_value() {
        assert_eq!(CborValue::NegativeInt(0).as_i128(), Some(-1));
        assert_eq!(CborValue::NegativeInt(u64::MAX).as_i128(), Some(-(1i128 << 64)));
        assert_eq!(CborValue::from(-500i64), CborValue::NegativeInt(499));
        assert_eq!(CborValue::from(i64::MIN).as_i128(), Some(i64::MIN as i128));
    }

    #[test]
    fn test_from_i128_range() {
        assert_eq!(CborValue::from_i128(-(1i128 << 64)), Some(CborValue::NegativeInt(u64::MAX)));
        assert_eq!(CborValue::from_i128(-(1i128 << 64) - 1), None);
        assert_eq!(CborValue::from_i128(u64::MAX as i128), Some(CborValue::UnsignedInt(u64::MAX)));
        assert_eq!(CborValue::from_i128(1i128 << 64), None);
    }

    #[test]
    fn test_accessors_reject_other_types() {
        let v = CborValue::TextString("x".into());
        assert_eq!(v.as_str(), Some("x"));
        assert_eq!(v.as_bytes(), None);
        assert_eq!(v.as_u64(), None);
        assert!(!v.is_null());
        assert_eq!(v.type_name(), "text string");
    }
}
