//! Transaction encoding/decoding.

use tracing::{debug, trace};

use crate::codec::primitives::{Reader, Writer};
use crate::codec::record::{decode_record, encode_record};
use crate::error::{DecodeError, EncodeError};
use crate::limits::MAX_TX_SIZE;
use crate::model::{Node, Transaction};
use crate::schema::SchemaVersion;

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a transaction written with the default schema.
pub fn decode_transaction(input: &[u8]) -> Result<Transaction, DecodeError> {
    decode_transaction_with_schema(input, SchemaVersion::default())
}

/// Decodes a transaction written with `schema`.
pub fn decode_transaction_with_schema(
    input: &[u8],
    schema: SchemaVersion,
) -> Result<Transaction, DecodeError> {
    let node = decode_node(input, schema)?;
    Transaction::from_node(&node, schema)
}

/// Decodes transaction bytes into a dynamic [`Node`] record.
///
/// Fields come out in tag order. `inputs` and `outputs` are present even
/// when empty; an absent optional `reward` is left out.
pub fn decode_node(input: &[u8], schema: SchemaVersion) -> Result<Node, DecodeError> {
    if input.len() > MAX_TX_SIZE {
        return Err(DecodeError::LengthExceedsLimit {
            field: "transaction",
            len: input.len(),
            max: MAX_TX_SIZE,
        });
    }
    if input.is_empty() {
        return Err(DecodeError::UnexpectedEof { context: "transaction" });
    }

    let mut reader = Reader::new(input);
    let node = decode_record(&mut reader, schema.transaction())?;
    trace!(len = input.len(), ?schema, "decoded transaction");
    Ok(node)
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a transaction with the schema it was built for.
pub fn encode_transaction(tx: &Transaction) -> Result<Vec<u8>, EncodeError> {
    encode_node(&tx.to_node(), tx.schema())
}

/// Encodes a record node with `schema`.
pub fn encode_node(node: &Node, schema: SchemaVersion) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(256);
    encode_record(&mut writer, node, schema.transaction()).inspect_err(|err| {
        debug!(%err, ?schema, "transaction encode failed");
    })?;
    if writer.len() > MAX_TX_SIZE {
        return Err(EncodeError::LengthExceedsLimit {
            field: "transaction",
            len: writer.len(),
            max: MAX_TX_SIZE,
        });
    }
    Ok(writer.into_bytes())
}

/// Builds a transaction from a plain field map and encodes it.
///
/// `reward`/`script` defaults are substituted first when `schema` declares
/// them, so a map that leaves them out still encodes.
pub fn encode_fields(
    fields: &serde_json::Value,
    schema: SchemaVersion,
) -> Result<Vec<u8>, EncodeError> {
    Transaction::from_fields_with_schema(fields, schema)?.serialize()
}
