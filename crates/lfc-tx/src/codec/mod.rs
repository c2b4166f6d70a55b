//! Binary encoding/decoding for LFC transactions.
//!
//! The wire layout is protocol-buffers compatible; field tags and labels come
//! from [`crate::schema`].

pub mod primitives;
pub mod record;
pub mod transaction;

pub use primitives::{Reader, Writer};
pub use record::{decode_record, encode_record};
pub use transaction::{
    decode_node, decode_transaction, decode_transaction_with_schema, encode_fields, encode_node,
    encode_transaction,
};
