//! Primitive encoding/decoding for the LFC binary format.
//!
//! Implements varints, field keys and length-delimited payloads using the
//! protocol-buffers wire layout.

use crate::error::DecodeError;
use crate::limits::MAX_VARINT_BYTES;
use crate::schema::{WIRE_FIXED32, WIRE_FIXED64, WIRE_LEN, WIRE_VARINT};

// =============================================================================
// DECODING
// =============================================================================

/// Cursor over an encoded record.
///
/// Every read is bounds checked; running off the end reports
/// [`DecodeError::UnexpectedEof`] with the caller's context.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.remaining().is_empty()
    }

    #[inline]
    pub fn read_byte(&mut self, context: &'static str) -> Result<u8, DecodeError> {
        let [byte] = self.read_bytes(1, context)? else {
            return Err(DecodeError::UnexpectedEof { context });
        };
        Ok(*byte)
    }

    /// Consumes the next `n` bytes.
    #[inline]
    pub fn read_bytes(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], DecodeError> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|end| *end <= self.data.len())
            .ok_or(DecodeError::UnexpectedEof { context })?;
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Reads a base-128 varint of at most ten bytes.
    #[inline]
    pub fn read_varint(&mut self, context: &'static str) -> Result<u64, DecodeError> {
        let mut value = 0u64;
        for i in 0..MAX_VARINT_BYTES {
            let byte = self.read_byte(context)?;
            let bits = u64::from(byte & 0x7f);
            let shift = 7 * i as u32;
            // The tenth byte only carries bit 63.
            if shift == 63 && bits > 1 {
                return Err(DecodeError::VarintOverflow);
            }
            value |= bits << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::VarintTooLong)
    }

    /// Reads a field key, returning `(tag, wire_type)`.
    pub fn read_key(&mut self) -> Result<(u32, u8), DecodeError> {
        let key = self.read_varint("field key")?;
        let tag = u32::try_from(key >> 3)
            .map_err(|_| DecodeError::MalformedEncoding { context: "field tag exceeds u32" })?;
        if tag == 0 {
            return Err(DecodeError::InvalidTag);
        }
        Ok((tag, (key & 0x07) as u8))
    }

    /// Reads a varint length prefix and the bytes it covers.
    pub fn read_len_prefixed(
        &mut self,
        max: usize,
        field: &'static str,
    ) -> Result<&'a [u8], DecodeError> {
        let len = self.read_varint(field)?;
        let len = usize::try_from(len).unwrap_or(usize::MAX);
        if len > max {
            return Err(DecodeError::LengthExceedsLimit { field, len, max });
        }
        self.read_bytes(len, field)
    }

    pub fn read_string(&mut self, max: usize, field: &'static str) -> Result<String, DecodeError> {
        let bytes = self.read_len_prefixed(max, field)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| DecodeError::InvalidUtf8 { field })
    }

    /// Skips over the payload of a field this reader does not know.
    pub fn skip_field(&mut self, tag: u32, wire_type: u8) -> Result<(), DecodeError> {
        match wire_type {
            WIRE_VARINT => {
                self.read_varint("unknown field")?;
            }
            WIRE_FIXED64 => {
                self.read_bytes(8, "unknown field")?;
            }
            WIRE_LEN => {
                self.read_len_prefixed(usize::MAX, "unknown field")?;
            }
            WIRE_FIXED32 => {
                self.read_bytes(4, "unknown field")?;
            }
            _ => return Err(DecodeError::UnsupportedWireType { tag, wire_type }),
        }
        Ok(())
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Growable output buffer for an encoded record.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocates room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Appends bytes as-is, without a length prefix.
    #[inline]
    pub fn write_raw(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Appends `value` as a base-128 varint, low group first.
    #[inline]
    pub fn write_varint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    /// Writes a field key.
    #[inline]
    pub fn write_key(&mut self, tag: u32, wire_type: u8) {
        self.write_varint((u64::from(tag) << 3) | u64::from(wire_type));
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_bytes_prefixed(s.as_bytes());
    }

    /// Writes a varint length followed by `bytes`.
    pub fn write_bytes_prefixed(&mut self, bytes: &[u8]) {
        self.write_varint(bytes.len() as u64);
        self.write_raw(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Number of bytes `value` takes as a varint.
    fn varint_len(value: u64) -> usize {
        let bits = 64 - value.leading_zeros() as usize;
        bits.max(1).div_ceil(7)
    }

    #[test]
    fn test_varints() {
        for v in [0u64, 1, 127, 128, 150, 16383, 16384, 1_600_000_000_000, u64::MAX] {
            let mut writer = Writer::new();
            writer.write_varint(v);
            assert_eq!(writer.len(), varint_len(v), "length of {}", v);

            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_varint("v").unwrap(), v);
            assert!(reader.is_empty());
        }
    }

    #[test]
    fn test_varint_known_bytes() {
        let mut writer = Writer::new();
        writer.write_varint(150);
        assert_eq!(writer.as_bytes(), &[0x96, 0x01]);
    }

    #[test]
    fn test_varint_overflow() {
        // Ten bytes whose last group exceeds bit 63.
        let mut data = [0xffu8; 10];
        data[9] = 0x02;
        assert!(matches!(
            Reader::new(&data).read_varint("v"),
            Err(DecodeError::VarintOverflow)
        ));

        let data = [0x80u8; 11];
        assert!(matches!(
            Reader::new(&data).read_varint("v"),
            Err(DecodeError::VarintTooLong)
        ));
    }

    #[test]
    fn test_key_roundtrip() {
        let mut writer = Writer::new();
        writer.write_key(6, WIRE_LEN);
        assert_eq!(writer.as_bytes(), &[0x32]);

        let mut reader = Reader::new(writer.as_bytes());
        assert_eq!(reader.read_key().unwrap(), (6, WIRE_LEN));
    }

    #[test]
    fn test_tag_zero_rejected() {
        let mut reader = Reader::new(&[0x02]);
        assert!(matches!(reader.read_key(), Err(DecodeError::InvalidTag)));
    }

    #[test]
    fn test_strings() {
        for s in ["", "0x", "minted", "unicode: \u{1F600}"] {
            let mut writer = Writer::new();
            writer.write_string(s);
            let mut reader = Reader::new(writer.as_bytes());
            assert_eq!(reader.read_string(1000, "s").unwrap(), s);
        }

        let mut writer = Writer::new();
        writer.write_bytes_prefixed(&[0xFF, 0xFE]);
        let mut reader = Reader::new(writer.as_bytes());
        assert!(matches!(
            reader.read_string(100, "address"),
            Err(DecodeError::InvalidUtf8 { field: "address" })
        ));
    }

    #[test]
    fn test_skip_unknown_fields() {
        let mut writer = Writer::new();
        writer.write_varint(300);
        writer.write_raw(&[0u8; 8]);
        writer.write_string("skipped");
        writer.write_raw(&[0u8; 4]);

        let mut reader = Reader::new(writer.as_bytes());
        reader.skip_field(9, WIRE_VARINT).unwrap();
        reader.skip_field(9, WIRE_FIXED64).unwrap();
        reader.skip_field(9, WIRE_LEN).unwrap();
        reader.skip_field(9, WIRE_FIXED32).unwrap();
        assert!(reader.is_empty());

        let mut reader = Reader::new(&[0u8; 4]);
        assert!(matches!(
            reader.skip_field(9, 3),
            Err(DecodeError::UnsupportedWireType { tag: 9, wire_type: 3 })
        ));
    }

    #[test]
    fn test_length_limit() {
        let mut writer = Writer::new();
        writer.write_bytes_prefixed(&[b'a'; 1000]);
        let mut reader = Reader::new(writer.as_bytes());
        assert!(matches!(
            reader.read_string(100, "address"),
            Err(DecodeError::LengthExceedsLimit { len: 1000, max: 100, .. })
        ));
    }

    #[test]
    fn test_truncated() {
        let mut reader = Reader::new(&[0u8; 5]);
        assert!(matches!(
            reader.read_bytes(10, "tx"),
            Err(DecodeError::UnexpectedEof { context: "tx" })
        ));
        // A length prefix promising more than is left.
        let mut reader = Reader::new(&[0x05, b'a']);
        assert!(matches!(
            reader.read_string(100, "tx"),
            Err(DecodeError::UnexpectedEof { .. })
        ));
    }
}
