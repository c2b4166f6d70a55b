//! Field layout of the LFC transaction record.
//!
//! The codec and the validator both read these tables. Tags are part of the
//! wire contract: a tag is never renumbered, and a field dropped by a schema
//! version leaves its tag unused.
//!
//! ```text
//! message LFCOutput {
//!   required uint64 index = 1;
//!   required uint64 amount = 2;
//!   required string address = 3;
//! }
//!
//! message LFCInput {
//!   required uint64 index = 1;
//!   required string tx = 2;
//!   required uint64 amount = 3;
//!   required string address = 4;
//!   required string signature = 5;
//! }
//!
//! message LFCTransaction {              // V2
//!   required string id = 1;
//!   required uint64 time = 2;
//!   required string reward = 3;         // V1: optional
//!   required string script = 4;         // V1: absent
//!   repeated LFCInput inputs = 5;
//!   repeated LFCOutput outputs = 6;
//! }
//! ```

use crate::limits::ABSENCE_MARKER;

/// Wire type for varint-encoded integers.
pub const WIRE_VARINT: u8 = 0;
/// Wire type for 64-bit fixed values (only skipped).
pub const WIRE_FIXED64: u8 = 1;
/// Wire type for length-delimited strings and nested records.
pub const WIRE_LEN: u8 = 2;
/// Wire type for 32-bit fixed values (only skipped).
pub const WIRE_FIXED32: u8 = 5;

/// Record name of the transaction root.
pub const TX_RECORD: &str = "LFCTx";
/// Record name of an input.
pub const INPUT_RECORD: &str = "LFCInput";
/// Record name of an output.
pub const OUTPUT_RECORD: &str = "LFCOutput";

/// Cardinality marker of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Required,
    Optional,
    Repeated,
}

/// Primitive type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    UInt64,
    String,
    Record(&'static RecordSpec),
}

impl FieldKind {
    /// Wire type used for this kind.
    pub fn wire_type(&self) -> u8 {
        match self {
            FieldKind::UInt64 => WIRE_VARINT,
            FieldKind::String | FieldKind::Record(_) => WIRE_LEN,
        }
    }

    /// Human-readable type name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::UInt64 => "uint64",
            FieldKind::String => "string",
            FieldKind::Record(spec) => spec.name,
        }
    }
}

/// One field of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub tag: u32,
    pub label: Label,
    pub kind: FieldKind,
    /// Value substituted when a record is built from a field map that
    /// leaves this field out.
    pub default: Option<&'static str>,
}

impl FieldSpec {
    const fn new(name: &'static str, tag: u32, label: Label, kind: FieldKind) -> Self {
        Self {
            name,
            tag,
            label,
            kind,
            default: None,
        }
    }

    const fn with_default(mut self, default: &'static str) -> Self {
        self.default = Some(default);
        self
    }
}

/// A record layout: a name plus its fields in tag order.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordSpec {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl RecordSpec {
    /// Finds a field by wire tag.
    pub fn field_by_tag(&self, tag: u32) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub static OUTPUT: RecordSpec = RecordSpec {
    name: OUTPUT_RECORD,
    fields: &[
        FieldSpec::new("index", 1, Label::Required, FieldKind::UInt64),
        FieldSpec::new("amount", 2, Label::Required, FieldKind::UInt64),
        FieldSpec::new("address", 3, Label::Required, FieldKind::String),
    ],
};

pub static INPUT: RecordSpec = RecordSpec {
    name: INPUT_RECORD,
    fields: &[
        FieldSpec::new("index", 1, Label::Required, FieldKind::UInt64),
        FieldSpec::new("tx", 2, Label::Required, FieldKind::String),
        FieldSpec::new("amount", 3, Label::Required, FieldKind::UInt64),
        FieldSpec::new("address", 4, Label::Required, FieldKind::String),
        FieldSpec::new("signature", 5, Label::Required, FieldKind::String),
    ],
};

static TRANSACTION_V1: RecordSpec = RecordSpec {
    name: TX_RECORD,
    fields: &[
        FieldSpec::new("id", 1, Label::Required, FieldKind::String),
        FieldSpec::new("time", 2, Label::Required, FieldKind::UInt64),
        FieldSpec::new("reward", 3, Label::Optional, FieldKind::String),
        FieldSpec::new("inputs", 5, Label::Repeated, FieldKind::Record(&INPUT)),
        FieldSpec::new("outputs", 6, Label::Repeated, FieldKind::Record(&OUTPUT)),
    ],
};

static TRANSACTION_V2: RecordSpec = RecordSpec {
    name: TX_RECORD,
    fields: &[
        FieldSpec::new("id", 1, Label::Required, FieldKind::String),
        FieldSpec::new("time", 2, Label::Required, FieldKind::UInt64),
        FieldSpec::new("reward", 3, Label::Required, FieldKind::String)
            .with_default(ABSENCE_MARKER),
        FieldSpec::new("script", 4, Label::Required, FieldKind::String)
            .with_default(ABSENCE_MARKER),
        FieldSpec::new("inputs", 5, Label::Repeated, FieldKind::Record(&INPUT)),
        FieldSpec::new("outputs", 6, Label::Repeated, FieldKind::Record(&OUTPUT)),
    ],
};

/// Named layout versions of the transaction record.
///
/// The versions are wire-incompatible for `reward`/`script`; bytes must be
/// decoded with the version that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchemaVersion {
    /// Optional `reward`, no `script`.
    V1,
    /// Required `reward` and `script`, both defaulting to `"0x"`.
    #[default]
    V2,
}

impl SchemaVersion {
    /// All known versions, oldest first.
    pub const ALL: [SchemaVersion; 2] = [SchemaVersion::V1, SchemaVersion::V2];

    /// Layout of the transaction root for this version.
    pub fn transaction(&self) -> &'static RecordSpec {
        match self {
            SchemaVersion::V1 => &TRANSACTION_V1,
            SchemaVersion::V2 => &TRANSACTION_V2,
        }
    }

    /// Top-level fields in tag order.
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.transaction().fields
    }

    /// Number of top-level fields.
    pub fn field_count(&self) -> usize {
        self.fields().len()
    }

    /// Whether this version declares a top-level field.
    pub fn declares(&self, name: &str) -> bool {
        self.transaction().field(name).is_some()
    }

    /// Default substituted for `name` when it is left out of a field map.
    pub fn default_for(&self, name: &str) -> Option<&'static str> {
        self.transaction().field(name).and_then(|f| f.default)
    }
}
