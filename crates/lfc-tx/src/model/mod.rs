//! Data model types for LFC transactions.
//!
//! - Transactions, inputs and outputs (immutable value types)
//! - Nodes (dynamic view for path resolution)
//! - Builders (ergonomic construction)
//! - Field maps (construction from plain JSON objects)

pub mod builder;
pub mod fields;
pub mod node;
pub mod transaction;

pub use builder::TransactionBuilder;
pub use fields::json_type;
pub use node::Node;
pub use transaction::{Input, Output, Transaction};
