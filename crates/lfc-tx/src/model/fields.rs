//! Construction from plain field maps (`serde_json::Value` objects).

use serde_json::{Map, Value};

use crate::error::EncodeError;
use crate::limits::ABSENCE_MARKER;
use crate::model::{Input, Output, Transaction};
use crate::schema::{INPUT_RECORD, OUTPUT_RECORD, SchemaVersion, TX_RECORD};

/// JSON type name, as reported in type errors.
pub fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Transaction {
    /// Builds a transaction from a field map using the default schema.
    pub fn from_fields(fields: &Value) -> Result<Self, EncodeError> {
        Self::from_fields_with_schema(fields, SchemaVersion::default())
    }

    /// Builds a transaction from a field map.
    ///
    /// A missing, null or empty `reward`/`script` takes the schema's default
    /// (`"0x"` in V2). A `script` of `"0x"` under a schema without `script`
    /// counts as unset. Numeric fields accept JSON integers or decimal
    /// strings.
    pub fn from_fields_with_schema(
        fields: &Value,
        schema: SchemaVersion,
    ) -> Result<Self, EncodeError> {
        let map = as_object(fields, TX_RECORD)?;

        let id = required_string(map, TX_RECORD, "id")?;
        let time = required_u64(map, TX_RECORD, "time")?;
        let reward = defaulted_string(map, schema, "reward")?;
        let script = defaulted_string(map, schema, "script")?;

        let inputs = records(map, "inputs")?
            .iter()
            .map(|value| -> Result<Input, EncodeError> {
                let input = as_object(value, INPUT_RECORD)?;
                Ok(Input::new(
                    required_u64(input, INPUT_RECORD, "index")?,
                    required_string(input, INPUT_RECORD, "tx")?,
                    required_u64(input, INPUT_RECORD, "amount")?,
                    required_string(input, INPUT_RECORD, "address")?,
                    required_string(input, INPUT_RECORD, "signature")?,
                ))
            })
            .collect::<Result<Vec<_>, EncodeError>>()?;

        let outputs = records(map, "outputs")?
            .iter()
            .map(|value| -> Result<Output, EncodeError> {
                let output = as_object(value, OUTPUT_RECORD)?;
                Ok(Output::new(
                    required_u64(output, OUTPUT_RECORD, "index")?,
                    required_u64(output, OUTPUT_RECORD, "amount")?,
                    required_string(output, OUTPUT_RECORD, "address")?,
                ))
            })
            .collect::<Result<Vec<_>, EncodeError>>()?;

        Ok(Transaction::from_parts(
            schema, id, time, reward, script, inputs, outputs,
        ))
    }
}

fn as_object<'a>(value: &'a Value, record: &'static str) -> Result<&'a Map<String, Value>, EncodeError> {
    value.as_object().ok_or(EncodeError::NotARecord {
        record,
        found: json_type(value),
    })
}

fn present<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    map.get(field).filter(|v| !v.is_null())
}

fn required_string(
    map: &Map<String, Value>,
    record: &'static str,
    field: &'static str,
) -> Result<String, EncodeError> {
    match present(map, field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(EncodeError::WrongType {
            record,
            field,
            expected: "string",
            found: json_type(other),
        }),
        None => Err(EncodeError::MissingField { record, field }),
    }
}

fn required_u64(
    map: &Map<String, Value>,
    record: &'static str,
    field: &'static str,
) -> Result<u64, EncodeError> {
    let wrong_type = |found| EncodeError::WrongType {
        record,
        field,
        expected: "uint64",
        found,
    };
    match present(map, field) {
        Some(Value::Number(n)) => n.as_u64().ok_or(wrong_type("number")),
        Some(Value::String(s)) => s.trim().parse::<u64>().map_err(|_| wrong_type("string")),
        Some(other) => Err(wrong_type(json_type(other))),
        None => Err(EncodeError::MissingField { record, field }),
    }
}

fn defaulted_string(
    map: &Map<String, Value>,
    schema: SchemaVersion,
    field: &'static str,
) -> Result<Option<String>, EncodeError> {
    let value = match present(map, field) {
        Some(Value::String(s)) if s.is_empty() => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            return Err(EncodeError::WrongType {
                record: TX_RECORD,
                field,
                expected: "string",
                found: json_type(other),
            });
        }
        None => None,
    };

    if !schema.declares(field) && value.as_deref() == Some(ABSENCE_MARKER) {
        return Ok(None);
    }
    Ok(value.or_else(|| schema.default_for(field).map(str::to_string)))
}

fn records<'a>(map: &'a Map<String, Value>, field: &'static str) -> Result<&'a [Value], EncodeError> {
    match present(map, field) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(EncodeError::WrongType {
            record: TX_RECORD,
            field,
            expected: "list",
            found: json_type(other),
        }),
        None => Ok(&[]),
    }
}
