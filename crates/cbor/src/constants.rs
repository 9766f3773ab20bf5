//! CBOR constants.

// MAJOR type values (bits 7-5 of the initial byte)
pub const MAJOR_UIN: u8 = 0b000;
pub const MAJOR_NIN: u8 = 0b001;
pub const MAJOR_BIN: u8 = 0b010;
pub const MAJOR_STR: u8 = 0b011;
pub const MAJOR_ARR: u8 = 0b100;
pub const MAJOR_MAP: u8 = 0b101;
pub const MAJOR_TAG: u8 = 0b110;
pub const MAJOR_TKN: u8 = 0b111;

// MAJOR type overlays (major shifted to bits 7-5)
pub const OVERLAY_UIN: u8 = 0b000_00000;
pub const OVERLAY_NIN: u8 = 0b001_00000;
pub const OVERLAY_BIN: u8 = 0b010_00000;
pub const OVERLAY_STR: u8 = 0b011_00000;
pub const OVERLAY_ARR: u8 = 0b100_00000;
pub const OVERLAY_MAP: u8 = 0b101_00000;
pub const OVERLAY_TAG: u8 = 0b110_00000;

pub const MINOR_MASK: u8 = 0b11111;

// Additional-info values selecting the length-extension width.
pub const MINOR_U8: u8 = 24;
pub const MINOR_U16: u8 = 25;
pub const MINOR_U32: u8 = 26;
pub const MINOR_U64: u8 = 27;
pub const MINOR_INDEFINITE: u8 = 31;

// Simple values (major type 7).
pub const SIMPLE_FALSE: u8 = 20;
pub const SIMPLE_TRUE: u8 = 21;
pub const SIMPLE_NULL: u8 = 22;

pub const CBOR_FALSE: u8 = 0xf4;
pub const CBOR_TRUE: u8 = 0xf5;
pub const CBOR_NULL: u8 = 0xf6;

/// Tag for IPLD content identifiers.
pub const TAG_CID: u64 = 42;

/// Deepest container nesting accepted by the decoder.
pub const MAX_DEPTH: usize = 64;
