//! Builder API for ergonomic Transaction construction.
//!
//! # Example
//!
//! ```rust
//! use lfc_tx::model::{Input, Output, TransactionBuilder};
//!
//! let hash = "0".repeat(64);
//! let tx = TransactionBuilder::new(hash.clone(), 1_600_000_000_000)
//!     .reward("minted")
//!     .input(Input::new(0, hash.clone(), 150, hash.clone(), hash.clone()))
//!     .output(Output::new(0, 150, hash))
//!     .build();
//!
//! assert_eq!(tx.script(), Some("0x"));
//! ```

use crate::model::{Input, Output, Transaction};
use crate::schema::SchemaVersion;

/// Builder for constructing a Transaction.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    schema: SchemaVersion,
    id: String,
    time: u64,
    reward: Option<String>,
    script: Option<String>,
    inputs: Vec<Input>,
    outputs: Vec<Output>,
}

impl TransactionBuilder {
    /// Creates a new builder with the given id and timestamp.
    pub fn new(id: impl Into<String>, time: u64) -> Self {
        Self {
            schema: SchemaVersion::default(),
            id: id.into(),
            time,
            reward: None,
            script: None,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Selects the schema version the transaction encodes with.
    pub fn schema(mut self, schema: SchemaVersion) -> Self {
        self.schema = schema;
        self
    }

    pub fn reward(mut self, reward: impl Into<String>) -> Self {
        self.reward = Some(reward.into());
        self
    }

    pub fn script(mut self, script: impl Into<String>) -> Self {
        self.script = Some(script.into());
        self
    }

    /// Appends an input.
    pub fn input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    /// Appends several inputs at once.
    pub fn inputs(mut self, inputs: impl IntoIterator<Item = Input>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    /// Appends an output.
    pub fn output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// Appends several outputs at once.
    pub fn outputs(mut self, outputs: impl IntoIterator<Item = Output>) -> Self {
        self.outputs.extend(outputs);
        self
    }

    /// Builds the transaction, filling unset `reward`/`script` with the
    /// schema's defaults.
    pub fn build(self) -> Transaction {
        let schema = self.schema;
        let reward = self
            .reward
            .or_else(|| schema.default_for("reward").map(str::to_string));
        let script = self
            .script
            .or_else(|| schema.default_for("script").map(str::to_string));
        Transaction::from_parts(
            schema,
            self.id,
            self.time,
            reward,
            script,
            self.inputs,
            self.outputs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults_v2() {
        let tx = TransactionBuilder::new("id", 1).build();
        assert_eq!(tx.reward(), Some("0x"));
        assert_eq!(tx.script(), Some("0x"));
        assert!(tx.inputs().is_empty());
    }

    #[test]
    fn test_builder_no_defaults_v1() {
        let tx = TransactionBuilder::new("id", 1)
            .schema(SchemaVersion::V1)
            .build();
        assert_eq!(tx.reward(), None);
        assert_eq!(tx.script(), None);
    }

    #[test]
    fn test_builder_collections() {
        let tx = TransactionBuilder::new("id", 1)
            .inputs([Input::new(0, "a", 1, "b", "cc"), Input::new(1, "a", 2, "b", "dd")])
            .outputs([Output::new(0, 3, "c")])
            .output(Output::new(1, 0, "d"))
            .build();
        assert_eq!(tx.inputs().len(), 2);
        assert_eq!(tx.outputs().len(), 2);
        assert_eq!(tx.outputs()[1].address(), "d");
    }
}
