//! Error types for LFC transaction encoding, decoding, resolution and validation.

use thiserror::Error;

/// Error codes grouping the decode failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// F001: Input ended early
    Truncated,
    /// F002: Wire type or tag does not fit the schema
    SchemaMismatch,
    /// F003: Required field missing
    MissingField,
    /// F004: Invalid UTF-8 encoding
    InvalidUtf8,
    /// F005: Malformed varint/length/limits
    MalformedEncoding,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "F001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::Truncated => "F001",
            ErrorCode::SchemaMismatch => "F002",
            ErrorCode::MissingField => "F003",
            ErrorCode::InvalidUtf8 => "F004",
            ErrorCode::MalformedEncoding => "F005",
        }
    }
}

/// Error during binary decoding (malformed or truncated bytes).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    // === F001: Truncated ===
    #[error("[F001] unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    // === F002: Schema mismatch ===
    #[error("[F002] {record}.{field} expects wire type {expected}, found {found}")]
    WireTypeMismatch {
        record: &'static str,
        field: &'static str,
        expected: u8,
        found: u8,
    },

    #[error("[F002] unsupported wire type {wire_type} for tag {tag}")]
    UnsupportedWireType { tag: u32, wire_type: u8 },

    #[error("[F002] invalid field tag 0")]
    InvalidTag,

    // === F003: Missing field ===
    #[error("[F003] {record} is missing required field '{field}'")]
    MissingRequiredField {
        record: &'static str,
        field: &'static str,
    },

    // === F004: Invalid UTF-8 ===
    #[error("[F004] invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    // === F005: Malformed encoding ===
    #[error("[F005] varint exceeds maximum length (10 bytes)")]
    VarintTooLong,

    #[error("[F005] varint overflow (value exceeds u64)")]
    VarintOverflow,

    #[error("[F005] {field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("[F005] malformed encoding: {context}")]
    MalformedEncoding { context: &'static str },
}

impl DecodeError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::UnexpectedEof { .. } => ErrorCode::Truncated,
            DecodeError::WireTypeMismatch { .. }
            | DecodeError::UnsupportedWireType { .. }
            | DecodeError::InvalidTag => ErrorCode::SchemaMismatch,
            DecodeError::MissingRequiredField { .. } => ErrorCode::MissingField,
            DecodeError::InvalidUtf8 { .. } => ErrorCode::InvalidUtf8,
            _ => ErrorCode::MalformedEncoding,
        }
    }
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{record} is missing required field '{field}'")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record}.{field} expected {expected}, got {found}")]
    WrongType {
        record: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected a {record} record, got {found}")]
    NotARecord {
        record: &'static str,
        found: &'static str,
    },

    #[error("{record} does not declare field '{field}' in this schema version")]
    UndeclaredField { record: &'static str, field: String },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Error during path resolution.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    #[error("{record} has no property '{field}'")]
    MissingField { field: String, record: String },

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Error handling content identifiers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CidError {
    #[error("invalid CID: {0}")]
    Parse(String),

    #[error("unsupported multihash code 0x{code:x}")]
    UnsupportedHash { code: u64 },
}

/// A semantic rule violated by a transaction.
///
/// Every variant carries the path of the offending field
/// (e.g. `LFCTx.inputs[0].signature`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Expected: object got {actual} @{path}")]
    NotAnObject { path: String, actual: &'static str },

    #[error("Expected: array got {actual} @{path}")]
    NotAnArray { path: String, actual: &'static str },

    #[error("Expected: a value got nothing @{path}")]
    MissingField { path: String },

    #[error("Expected: {expected} got {actual} @{path}.length")]
    LengthMismatch {
        path: String,
        expected: usize,
        actual: usize,
    },

    #[error("Expected: typeof number got {actual} @{path}")]
    NotNumeric { path: String, actual: String },

    #[error("Expected: mined or minted got {actual} @{path}")]
    InvalidReward { path: String, actual: String },

    #[error("Expected: typeof string got {actual} @{path}")]
    NotString { path: String, actual: &'static str },

    #[error("Expected: hex got {actual} @{path}")]
    NotHex { path: String, actual: String },

    #[error("Transaction needs output! @{path}")]
    NoOutputs { path: String },

    #[error("transaction does not encode: {0}")]
    Encode(#[from] EncodeError),
}

impl ValidationError {
    /// Path of the offending field, if the rule is tied to one.
    pub fn path(&self) -> Option<&str> {
        match self {
            ValidationError::NotAnObject { path, .. }
            | ValidationError::NotAnArray { path, .. }
            | ValidationError::MissingField { path }
            | ValidationError::LengthMismatch { path, .. }
            | ValidationError::NotNumeric { path, .. }
            | ValidationError::InvalidReward { path, .. }
            | ValidationError::NotString { path, .. }
            | ValidationError::NotHex { path, .. }
            | ValidationError::NoOutputs { path } => Some(path),
            ValidationError::Encode(_) => None,
        }
    }
}
