//! Limits applied while decoding untrusted input.

/// Maximum bytes in a varint (64-bit LEB128).
pub const MAX_VARINT_BYTES: usize = 10;

/// Maximum length of any string field, in bytes.
pub const MAX_STRING_LEN: usize = 1 << 20;

/// Maximum number of entries in a repeated field.
pub const MAX_REPEATED: usize = 1 << 16;

/// Maximum size of an encoded transaction.
pub const MAX_TX_SIZE: usize = 16 << 20;

/// Length of `id` and input `tx` references (hex-encoded 32-byte hash).
pub const HASH_HEX_LEN: usize = 64;

/// Marker stored in place of an unset `reward`/`script`.
pub const ABSENCE_MARKER: &str = "0x";
