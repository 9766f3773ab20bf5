//! Hex text forms of byte strings.

use crate::BufferError;

/// `0x`-prefixed lowercase hex.
///
/// # Example
///
/// ```
/// use fil_codec_buffers::to_hex;
///
/// assert_eq!(to_hex(&[0x00, 0xe8, 0x07]), "0x00e807");
/// assert_eq!(to_hex(&[]), "0x");
/// ```
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parses hex with an optional `0x` prefix. The digit count must be even.
pub fn from_hex(s: &str) -> Result<Vec<u8>, BufferError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(digits).map_err(|_| BufferError::InvalidHex(s.to_string()))
}

/// Short hex preview for log lines: at most `max` bytes, then the count of
/// bytes left out.
///
/// ```
/// use fil_codec_buffers::print_octets;
///
/// assert_eq!(print_octets(&[0x82, 0x01, 0x02], 16), "820102");
/// assert_eq!(print_octets(&[0xff; 5], 2), "ffff..(+3)");
/// ```
pub fn print_octets(octets: &[u8], max: usize) -> String {
    let shown = &octets[..octets.len().min(max)];
    let mut out = hex::encode(shown);
    if octets.len() > max {
        out.push_str(&format!("..(+{})", octets.len() - max));
    }
    out
}
