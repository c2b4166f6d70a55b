//! The transaction record and its inputs/outputs.
//!
//! All three types are immutable once built: fields are private, exposed
//! through accessors, and never reassigned.

use std::fmt;

use crate::cid::TxCid;
use crate::codec::primitives::Writer;
use crate::codec::record::encode_record;
use crate::codec::transaction::{decode_transaction_with_schema, encode_transaction};
use crate::error::{DecodeError, EncodeError};
use crate::limits::ABSENCE_MARKER;
use crate::model::Node;
use crate::schema::{INPUT, INPUT_RECORD, OUTPUT, OUTPUT_RECORD, SchemaVersion, TX_RECORD};

/// Spends an earlier output.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Input {
    index: u64,
    tx: String,
    amount: u64,
    address: String,
    signature: String,
}

impl Input {
    pub fn new(
        index: u64,
        tx: impl Into<String>,
        amount: u64,
        address: impl Into<String>,
        signature: impl Into<String>,
    ) -> Self {
        Self {
            index,
            tx: tx.into(),
            amount,
            address: address.into(),
            signature: signature.into(),
        }
    }

    /// Index of the spent output within its transaction.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Id of the transaction holding the spent output.
    pub fn tx(&self) -> &str {
        &self.tx
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Hex-encoded signature over the input.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn to_node(&self) -> Node {
        Node::record(INPUT_RECORD)
            .with_field("index", self.index.into())
            .with_field("tx", self.tx.as_str().into())
            .with_field("amount", self.amount.into())
            .with_field("address", self.address.as_str().into())
            .with_field("signature", self.signature.as_str().into())
    }

    pub(crate) fn from_node(node: &Node) -> Result<Self, DecodeError> {
        Ok(Self {
            index: required_u64(node, INPUT_RECORD, "index")?,
            tx: required_str(node, INPUT_RECORD, "tx")?,
            amount: required_u64(node, INPUT_RECORD, "amount")?,
            address: required_str(node, INPUT_RECORD, "address")?,
            signature: required_str(node, INPUT_RECORD, "signature")?,
        })
    }

    /// Encoded length of this input as a standalone record.
    pub fn size(&self) -> Result<usize, EncodeError> {
        let mut writer = Writer::new();
        encode_record(&mut writer, &self.to_node(), &INPUT)?;
        Ok(writer.len())
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LFCInput <tx: \"{}\", index: \"{}\", amount: \"{}\", address: \"{}\", signature: \"{}\", ",
            self.tx,
            self.index,
            self.amount,
            self.address,
            self.signature,
        )?;
        write_size(f, self.size())
    }
}

/// Credits an amount to an address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Output {
    index: u64,
    amount: u64,
    address: String,
}

impl Output {
    pub fn new(index: u64, amount: u64, address: impl Into<String>) -> Self {
        Self {
            index,
            amount,
            address: address.into(),
        }
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn to_node(&self) -> Node {
        Node::record(OUTPUT_RECORD)
            .with_field("index", self.index.into())
            .with_field("amount", self.amount.into())
            .with_field("address", self.address.as_str().into())
    }

    pub(crate) fn from_node(node: &Node) -> Result<Self, DecodeError> {
        Ok(Self {
            index: required_u64(node, OUTPUT_RECORD, "index")?,
            amount: required_u64(node, OUTPUT_RECORD, "amount")?,
            address: required_str(node, OUTPUT_RECORD, "address")?,
        })
    }

    /// Encoded length of this output as a standalone record.
    pub fn size(&self) -> Result<usize, EncodeError> {
        let mut writer = Writer::new();
        encode_record(&mut writer, &self.to_node(), &OUTPUT)?;
        Ok(writer.len())
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "LFCOutput <index: \"{}\", amount: \"{}\", address: \"{}\", ",
            self.index,
            self.amount,
            self.address,
        )?;
        write_size(f, self.size())
    }
}

/// A Leofcoin transaction (`LFCTx`).
///
/// Built through [`TransactionBuilder`](crate::model::TransactionBuilder),
/// from a plain field map ([`Transaction::from_fields`]), or by decoding
/// bytes. The schema version it was built for travels with it and decides
/// how it encodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    schema: SchemaVersion,
    id: String,
    time: u64,
    reward: Option<String>,
    script: Option<String>,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
}

impl Transaction {
    pub(crate) fn from_parts(
        schema: SchemaVersion,
        id: String,
        time: u64,
        reward: Option<String>,
        script: Option<String>,
        inputs: Vec<Input>,
        outputs: Vec<Output>,
    ) -> Self {
        Self {
            schema,
            id,
            time,
            reward,
            script,
            inputs,
            outputs,
        }
    }

    /// Decodes a transaction encoded with the default schema.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::decode_with_schema(bytes, SchemaVersion::default())
    }

    /// Decodes a transaction encoded with `schema`.
    pub fn decode_with_schema(bytes: &[u8], schema: SchemaVersion) -> Result<Self, DecodeError> {
        decode_transaction_with_schema(bytes, schema)
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    /// Hex-encoded hash identifying the transaction.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Creation timestamp.
    pub fn time(&self) -> u64 {
        self.time
    }

    /// `"mined"`, `"minted"`, `"0x"`, or `None` when the schema allows it.
    pub fn reward(&self) -> Option<&str> {
        self.reward.as_deref()
    }

    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Canonical bytes of this transaction.
    pub fn serialize(&self) -> Result<Vec<u8>, EncodeError> {
        encode_transaction(self)
    }

    /// Length of the canonical bytes.
    pub fn size(&self) -> Result<usize, EncodeError> {
        self.serialize().map(|bytes| bytes.len())
    }

    /// Content identifier of the canonical bytes.
    pub fn cid(&self) -> Result<TxCid, EncodeError> {
        self.serialize().map(|bytes| TxCid::new(&bytes))
    }

    /// Dynamic view used by the resolver and tree walker.
    ///
    /// Unset optional fields are left out.
    pub fn to_node(&self) -> Node {
        let mut node = Node::record(TX_RECORD)
            .with_field("id", self.id.as_str().into())
            .with_field("time", self.time.into());
        if let Some(reward) = &self.reward {
            node = node.with_field("reward", reward.as_str().into());
        }
        if let Some(script) = &self.script {
            node = node.with_field("script", script.as_str().into());
        }
        node.with_field(
            "inputs",
            Node::List(self.inputs.iter().map(Input::to_node).collect()),
        )
        .with_field(
            "outputs",
            Node::List(self.outputs.iter().map(Output::to_node).collect()),
        )
    }

    /// Rebuilds a transaction from a decoded record node.
    pub fn from_node(node: &Node, schema: SchemaVersion) -> Result<Self, DecodeError> {
        let reward = optional_str(node, TX_RECORD, "reward")?;
        let script = optional_str(node, TX_RECORD, "script")?;
        Ok(Self {
            schema,
            id: required_str(node, TX_RECORD, "id")?,
            time: required_u64(node, TX_RECORD, "time")?,
            reward,
            script,
            inputs: list(node, "inputs")?
                .iter()
                .map(Input::from_node)
                .collect::<Result<_, _>>()?,
            outputs: list(node, "outputs")?
                .iter()
                .map(Output::from_node)
                .collect::<Result<_, _>>()?,
        })
    }

    /// Plain field-map projection.
    ///
    /// `inputs` is always an array, and unset `reward`/`script` show up as
    /// `"0x"`, so the shape does not depend on what the source carried.
    pub fn to_json(&self) -> serde_json::Value {
        let inputs: Vec<serde_json::Value> = self
            .inputs
            .iter()
            .map(|input| {
                serde_json::json!({
                    "index": input.index,
                    "tx": input.tx,
                    "amount": input.amount,
                    "address": input.address,
                    "signature": input.signature,
                })
            })
            .collect();
        let outputs: Vec<serde_json::Value> = self
            .outputs
            .iter()
            .map(|output| {
                serde_json::json!({
                    "index": output.index,
                    "amount": output.amount,
                    "address": output.address,
                })
            })
            .collect();

        serde_json::json!({
            "id": self.id,
            "time": self.time,
            "reward": self.reward.as_deref().unwrap_or(ABSENCE_MARKER),
            "inputs": inputs,
            "outputs": outputs,
            "script": self.script.as_deref().unwrap_or(ABSENCE_MARKER),
        })
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LFCTx <id: \"{}\", time: \"{}\", ", self.id, self.time)?;
        if let Some(reward) = &self.reward {
            write!(f, "reward: \"{}\", ", reward)?;
        }
        write!(
            f,
            "inputs: \"{}\", outputs: \"{}\"",
            self.inputs.len(),
            self.outputs.len()
        )?;
        if let Some(script) = &self.script {
            write!(f, ", script: {}", script)?;
        }
        write!(f, ", ")?;
        write_size(f, self.size())
    }
}

/// Closes a `Display` line with the encoded size, or `?` when the value
/// does not encode.
fn write_size(f: &mut fmt::Formatter<'_>, size: Result<usize, EncodeError>) -> fmt::Result {
    match size {
        Ok(size) => write!(f, "size: {}>", size),
        Err(_) => write!(f, "size: ?>"),
    }
}

fn required_str(node: &Node, record: &'static str, field: &'static str) -> Result<String, DecodeError> {
    match node.get(field) {
        Some(Node::String(s)) => Ok(s.clone()),
        Some(_) => Err(DecodeError::MalformedEncoding { context: field }),
        None => Err(DecodeError::MissingRequiredField { record, field }),
    }
}

fn optional_str(
    node: &Node,
    record: &'static str,
    field: &'static str,
) -> Result<Option<String>, DecodeError> {
    match node.get(field) {
        None | Some(Node::Null) => Ok(None),
        Some(_) => required_str(node, record, field).map(Some),
    }
}

fn required_u64(node: &Node, record: &'static str, field: &'static str) -> Result<u64, DecodeError> {
    match node.get(field) {
        Some(Node::Integer(n)) => Ok(*n),
        Some(_) => Err(DecodeError::MalformedEncoding { context: field }),
        None => Err(DecodeError::MissingRequiredField { record, field }),
    }
}

fn list<'a>(node: &'a Node, field: &'static str) -> Result<&'a [Node], DecodeError> {
    match node.get(field) {
        Some(Node::List(items)) => Ok(items),
        None | Some(Node::Null) => Ok(&[]),
        Some(_) => Err(DecodeError::MalformedEncoding { context: field }),
    }
}
