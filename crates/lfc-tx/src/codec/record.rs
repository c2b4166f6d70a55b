//! Schema-driven record encoding/decoding.
//!
//! Records travel as [`Node`] trees; the [`RecordSpec`] tables decide tag
//! order, wire types and which fields must be present.

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{ABSENCE_MARKER, MAX_REPEATED, MAX_STRING_LEN};
use crate::model::Node;
use crate::schema::{FieldKind, FieldSpec, Label, RecordSpec};

// =============================================================================
// DECODING
// =============================================================================

/// Decodes one record from `reader` until it is exhausted.
///
/// The returned record lists declared fields in tag order. Repeated fields
/// are always present (possibly empty); an absent optional field is left
/// out.
pub fn decode_record(
    reader: &mut Reader<'_>,
    spec: &'static RecordSpec,
) -> Result<Node, DecodeError> {
    let mut slots: Vec<Option<Node>> = vec![None; spec.fields.len()];

    while !reader.is_empty() {
        let (tag, wire_type) = reader.read_key()?;
        let Some(pos) = spec.fields.iter().position(|f| f.tag == tag) else {
            reader.skip_field(tag, wire_type)?;
            continue;
        };
        let field = &spec.fields[pos];
        let expected = field.kind.wire_type();
        if wire_type != expected {
            return Err(DecodeError::WireTypeMismatch {
                record: spec.name,
                field: field.name,
                expected,
                found: wire_type,
            });
        }

        let value = decode_value(reader, field)?;
        match field.label {
            Label::Repeated => {
                let slot = slots[pos].get_or_insert_with(|| Node::List(Vec::new()));
                if let Node::List(items) = slot {
                    if items.len() >= MAX_REPEATED {
                        return Err(DecodeError::LengthExceedsLimit {
                            field: field.name,
                            len: items.len() + 1,
                            max: MAX_REPEATED,
                        });
                    }
                    items.push(value);
                }
            }
            // Last occurrence wins for singular fields.
            Label::Required | Label::Optional => slots[pos] = Some(value),
        }
    }

    let mut fields = Vec::with_capacity(spec.fields.len());
    for (field, slot) in spec.fields.iter().zip(slots) {
        match (slot, field.label) {
            (Some(value), _) => fields.push((field.name, value)),
            (None, Label::Repeated) => fields.push((field.name, Node::List(Vec::new()))),
            (None, Label::Optional) => {}
            (None, Label::Required) => {
                return Err(DecodeError::MissingRequiredField {
                    record: spec.name,
                    field: field.name,
                });
            }
        }
    }

    Ok(Node::Record {
        kind: spec.name,
        fields,
    })
}

fn decode_value(reader: &mut Reader<'_>, field: &FieldSpec) -> Result<Node, DecodeError> {
    match field.kind {
        FieldKind::UInt64 => Ok(Node::Integer(reader.read_varint(field.name)?)),
        FieldKind::String => Ok(Node::String(reader.read_string(MAX_STRING_LEN, field.name)?)),
        FieldKind::Record(nested) => {
            let bytes = reader.read_len_prefixed(usize::MAX, field.name)?;
            decode_record(&mut Reader::new(bytes), nested)
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a record node into `writer`, following `spec`'s tag order.
///
/// Fields are looked up by name, so the order of fields in the node does
/// not affect the output. A field the schema does not declare is an error
/// unless it is null or holds the absence marker `"0x"`.
pub fn encode_record(
    writer: &mut Writer,
    node: &Node,
    spec: &'static RecordSpec,
) -> Result<(), EncodeError> {
    let Node::Record { fields, .. } = node else {
        return Err(EncodeError::NotARecord {
            record: spec.name,
            found: node.kind_name(),
        });
    };

    for (name, value) in fields {
        if spec.field(name).is_none() && !is_absent(value) {
            return Err(EncodeError::UndeclaredField {
                record: spec.name,
                field: name.to_string(),
            });
        }
    }

    for field in spec.fields {
        let value = node.get(field.name).filter(|v| !matches!(v, Node::Null));
        match (field.label, value) {
            (Label::Required, None) => {
                return Err(EncodeError::MissingField {
                    record: spec.name,
                    field: field.name,
                });
            }
            (Label::Optional, None) | (Label::Repeated, None) => {}
            (Label::Repeated, Some(Node::List(items))) => {
                if items.len() > MAX_REPEATED {
                    return Err(EncodeError::LengthExceedsLimit {
                        field: field.name,
                        len: items.len(),
                        max: MAX_REPEATED,
                    });
                }
                for item in items {
                    encode_value(writer, spec, field, item)?;
                }
            }
            (Label::Repeated, Some(other)) => {
                return Err(EncodeError::WrongType {
                    record: spec.name,
                    field: field.name,
                    expected: "list",
                    found: other.kind_name(),
                });
            }
            (Label::Required | Label::Optional, Some(value)) => {
                encode_value(writer, spec, field, value)?;
            }
        }
    }

    Ok(())
}

fn encode_value(
    writer: &mut Writer,
    spec: &'static RecordSpec,
    field: &FieldSpec,
    value: &Node,
) -> Result<(), EncodeError> {
    match (field.kind, value) {
        (FieldKind::UInt64, Node::Integer(n)) => {
            writer.write_key(field.tag, field.kind.wire_type());
            writer.write_varint(*n);
        }
        (FieldKind::String, Node::String(s)) => {
            if s.len() > MAX_STRING_LEN {
                return Err(EncodeError::LengthExceedsLimit {
                    field: field.name,
                    len: s.len(),
                    max: MAX_STRING_LEN,
                });
            }
            writer.write_key(field.tag, field.kind.wire_type());
            writer.write_string(s);
        }
        (FieldKind::Record(nested), Node::Record { .. }) => {
            let mut inner = Writer::new();
            encode_record(&mut inner, value, nested)?;
            writer.write_key(field.tag, field.kind.wire_type());
            writer.write_bytes_prefixed(inner.as_bytes());
        }
        (kind, other) => {
            return Err(EncodeError::WrongType {
                record: spec.name,
                field: field.name,
                expected: kind.type_name(),
                found: other.kind_name(),
            });
        }
    }
    Ok(())
}

fn is_absent(value: &Node) -> bool {
    match value {
        Node::Null => true,
        Node::String(s) => s == ABSENCE_MARKER,
        _ => false,
    }
}
