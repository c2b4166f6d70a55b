//! Field-level validation of transactions before encoding.
//!
//! Structural checks (wire types, required fields) happen in the codec.
//! This module adds the semantic rules a well-formed transaction must also
//! satisfy: hash lengths, numeric fields, reward values, hex signatures and
//! at least one output.
//!
//! Validation is fail-fast: the first violated rule is reported, in this
//! order:
//!
//! 1. `id` has 64 characters
//! 2. `time` is numeric
//! 3. `reward`, when set, is `mined`, `minted` or `0x`
//! 4. `script`, when set, is a string
//! 5. each input: `tx` length, `index`, `amount`, `address`, hex `signature`
//! 6. `outputs` is non-empty; each output: `index`, `amount`, `address`
//! 7. the whole record encodes under the chosen schema

use serde_json::{Map, Value};

use crate::codec::encode_fields;
use crate::error::ValidationError;
use crate::limits::{ABSENCE_MARKER, HASH_HEX_LEN};
use crate::model::{Transaction, json_type};
use crate::schema::{SchemaVersion, TX_RECORD};

/// Something the validator can check.
///
/// Typed transactions are checked through their field-map projection, so
/// both kinds of candidate go through the same rules.
#[derive(Debug, Clone, Copy)]
pub enum Candidate<'a> {
    Transaction(&'a Transaction),
    Fields(&'a Value),
}

impl<'a> From<&'a Transaction> for Candidate<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Candidate::Transaction(tx)
    }
}

impl<'a> From<&'a Value> for Candidate<'a> {
    fn from(fields: &'a Value) -> Self {
        Candidate::Fields(fields)
    }
}

/// Validates a candidate, reporting the first violated rule.
///
/// Transactions are encoded with their own schema version; field maps with
/// the default one.
pub fn validate<'a>(candidate: impl Into<Candidate<'a>>) -> Result<(), ValidationError> {
    match candidate.into() {
        Candidate::Transaction(tx) => validate_fields(&tx.to_json(), tx.schema()),
        Candidate::Fields(fields) => validate_fields(fields, SchemaVersion::default()),
    }
}

/// Validates a candidate, encoding it with `schema` in the final step.
pub fn validate_with_schema<'a>(
    candidate: impl Into<Candidate<'a>>,
    schema: SchemaVersion,
) -> Result<(), ValidationError> {
    match candidate.into() {
        Candidate::Transaction(tx) => validate_fields(&tx.to_json(), schema),
        Candidate::Fields(fields) => validate_fields(fields, schema),
    }
}

/// True when [`validate`] would succeed.
pub fn is_valid<'a>(candidate: impl Into<Candidate<'a>>) -> bool {
    validate(candidate).is_ok()
}

/// True when [`validate_with_schema`] would succeed.
pub fn is_valid_with_schema<'a>(candidate: impl Into<Candidate<'a>>, schema: SchemaVersion) -> bool {
    validate_with_schema(candidate, schema).is_ok()
}

fn validate_fields(fields: &Value, schema: SchemaVersion) -> Result<(), ValidationError> {
    let root = TX_RECORD;
    let tx = object(fields, root)?;

    check_hash(tx, "id", root)?;
    check_numeric(tx, "time", root)?;
    check_reward(tx, root)?;
    if let Some(script) = present(tx, "script") {
        if !script.is_string() {
            return Err(ValidationError::NotString {
                path: join(root, "script"),
                actual: json_type(script),
            });
        }
    }

    for (i, value) in array(tx, "inputs", root)?.iter().enumerate() {
        let path = format!("{}.inputs[{}]", root, i);
        let input = object(value, &path)?;
        check_hash(input, "tx", &path)?;
        check_numeric(input, "index", &path)?;
        check_numeric(input, "amount", &path)?;
        check_string(input, "address", &path)?;
        check_hex(input, "signature", &path)?;
    }

    let outputs = array(tx, "outputs", root)?;
    if outputs.is_empty() {
        return Err(ValidationError::NoOutputs {
            path: join(root, "outputs"),
        });
    }
    for (i, value) in outputs.iter().enumerate() {
        let path = format!("{}.outputs[{}]", root, i);
        let output = object(value, &path)?;
        check_numeric(output, "index", &path)?;
        check_numeric(output, "amount", &path)?;
        check_string(output, "address", &path)?;
    }

    encode_fields(fields, schema)?;
    Ok(())
}

fn join(path: &str, field: &str) -> String {
    format!("{}.{}", path, field)
}

fn present<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    map.get(field).filter(|v| !v.is_null())
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ValidationError> {
    value.as_object().ok_or_else(|| ValidationError::NotAnObject {
        path: path.to_string(),
        actual: json_type(value),
    })
}

/// An absent list counts as empty.
fn array<'a>(
    map: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a [Value], ValidationError> {
    match present(map, field) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(ValidationError::NotAnArray {
            path: join(path, field),
            actual: json_type(other),
        }),
        None => Ok(&[]),
    }
}

fn required<'a>(
    map: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a Value, ValidationError> {
    present(map, field).ok_or_else(|| ValidationError::MissingField {
        path: join(path, field),
    })
}

fn check_string<'a>(
    map: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a str, ValidationError> {
    let value = required(map, field, path)?;
    value.as_str().ok_or_else(|| ValidationError::NotString {
        path: join(path, field),
        actual: json_type(value),
    })
}

fn check_hash(map: &Map<String, Value>, field: &str, path: &str) -> Result<(), ValidationError> {
    let actual = check_string(map, field, path)?.chars().count();
    if actual != HASH_HEX_LEN {
        return Err(ValidationError::LengthMismatch {
            path: join(path, field),
            expected: HASH_HEX_LEN,
            actual,
        });
    }
    Ok(())
}

fn check_numeric(map: &Map<String, Value>, field: &str, path: &str) -> Result<(), ValidationError> {
    let value = required(map, field, path)?;
    let numeric = match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok_and(|n| !n.is_nan()),
        _ => false,
    };
    if numeric {
        return Ok(());
    }
    let actual = match value {
        Value::String(s) => format!("{:?}", s),
        other => json_type(other).to_string(),
    };
    Err(ValidationError::NotNumeric {
        path: join(path, field),
        actual,
    })
}

fn check_reward(map: &Map<String, Value>, path: &str) -> Result<(), ValidationError> {
    match present(map, "reward") {
        None => Ok(()),
        Some(Value::String(s)) if s.is_empty() => Ok(()),
        Some(Value::String(s)) if matches!(s.as_str(), "mined" | "minted" | ABSENCE_MARKER) => {
            Ok(())
        }
        Some(Value::String(s)) => Err(ValidationError::InvalidReward {
            path: join(path, "reward"),
            actual: s.clone(),
        }),
        Some(other) => Err(ValidationError::InvalidReward {
            path: join(path, "reward"),
            actual: json_type(other).to_string(),
        }),
    }
}

/// Hex digits with an optional `0x` prefix; at least one digit.
fn check_hex(map: &Map<String, Value>, field: &str, path: &str) -> Result<(), ValidationError> {
    let value = check_string(map, field, path)?;
    let digits = value.strip_prefix("0x").unwrap_or(value);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ValidationError::NotHex {
            path: join(path, field),
            actual: value.to_string(),
        });
    }
    Ok(())
}
