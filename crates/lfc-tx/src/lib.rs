//! LFC-TX: the Leofcoin transaction record.
//!
//! This crate provides encoding, decoding, content addressing, path
//! resolution and validation for Leofcoin transactions (`LFCTx`).
//!
//! # Overview
//!
//! A transaction moves value from inputs (earlier outputs, each signed) to
//! outputs (amounts credited to addresses). It is:
//! - **Immutable**: built once, read through accessors
//! - **Content-addressed**: its CID is derived from its canonical bytes
//! - **Linkable**: paths resolve into the record and stop at links to others
//!
//! # Quick Start
//!
//! ```rust
//! use lfc_tx::{Input, Output, TransactionBuilder};
//! use lfc_tx::{compute_cid, decode_transaction, encode_transaction, resolve, validate};
//!
//! let hash = "0".repeat(64);
//! let tx = TransactionBuilder::new(hash.clone(), 1_600_000_000_000)
//!     .reward("minted")
//!     .input(Input::new(0, hash.clone(), 150, hash.clone(), "deadbeef"))
//!     .output(Output::new(0, 150, hash))
//!     .build();
//!
//! validate(&tx).unwrap();
//!
//! let bytes = encode_transaction(&tx).unwrap();
//! assert_eq!(decode_transaction(&bytes).unwrap(), tx);
//!
//! let cid = compute_cid(&bytes);
//! assert!(cid.to_string().starts_with('z'));
//!
//! let reward = resolve(&bytes, "reward").unwrap();
//! assert_eq!(reward.value.as_str(), Some("minted"));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Value types (Transaction, Input, Output) and the dynamic Node view
//! - [`schema`]: Field tables for each schema version
//! - [`codec`]: Binary encoding/decoding
//! - [`mod@cid`]: Content identifiers
//! - [`resolver`]: Path resolution and tree enumeration
//! - [`mod@validate`]: Semantic validation
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Wire Format
//!
//! Transactions are protocol-buffers compatible messages:
//! - Key: varint `(tag << 3) | wire_type`
//! - Integers: varint (wire type 0)
//! - Strings and nested records: length-delimited (wire type 2)
//!
//! Two schema versions exist. `V2` (the default) carries a required
//! `reward` and `script`; `V1` has an optional `reward` and no `script`.

pub mod cid;
pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod resolver;
pub mod schema;
pub mod validate;

// Re-export commonly used types at crate root
pub use crate::cid::{CODEC, DEFAULT_HASH_ALG, HashAlgorithm, TxCid, compute_cid, compute_cid_with};
pub use codec::{decode_transaction, decode_transaction_with_schema, encode_fields, encode_transaction};
pub use error::{CidError, DecodeError, EncodeError, ErrorCode, ResolveError, ValidationError};
pub use model::{Input, Node, Output, Transaction, TransactionBuilder};
pub use resolver::{Paths, Resolution, resolve, resolve_node, resolve_with_schema, traverse, tree};
pub use schema::SchemaVersion;
pub use validate::{Candidate, is_valid, is_valid_with_schema, validate, validate_with_schema};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
