//! Path resolution and tree enumeration over decoded transactions.
//!
//! Paths are `/`-separated. Record fields are addressed by name and list
//! entries by decimal index, so `inputs/0/tx` names the `tx` field of the
//! first input. Resolution stops at a [`Node::Link`] and hands back the rest
//! of the path for the caller to continue against the linked record.

mod tree;

pub use tree::{Paths, traverse, tree, tree_with_schema};

use tracing::debug;

use crate::codec::decode_node;
use crate::error::ResolveError;
use crate::model::Node;
use crate::schema::SchemaVersion;

/// Result of resolving a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The node the path ended on, or the first link crossed.
    pub value: Node,
    /// Segments left unconsumed after a link, joined by `/`. Empty otherwise.
    pub remainder_path: String,
}

/// Decodes `bytes` with the default schema and resolves `path` within it.
pub fn resolve(bytes: &[u8], path: &str) -> Result<Resolution, ResolveError> {
    resolve_with_schema(bytes, path, SchemaVersion::default())
}

/// Decodes `bytes` with `schema` and resolves `path` within it.
pub fn resolve_with_schema(
    bytes: &[u8],
    path: &str,
    schema: SchemaVersion,
) -> Result<Resolution, ResolveError> {
    let node = decode_node(bytes, schema)?;
    resolve_node(&node, path)
}

/// Resolves `path` within an already decoded node.
///
/// An empty path (or `/`) returns the whole node.
pub fn resolve_node(root: &Node, path: &str) -> Result<Resolution, ResolveError> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let mut current = root;
    for (i, segment) in segments.iter().enumerate() {
        let Some(next) = current.get(segment) else {
            debug!(path, field = *segment, record = current.kind_name(), "resolve miss");
            return Err(ResolveError::MissingField {
                field: segment.to_string(),
                record: current.kind_name().to_string(),
            });
        };
        if next.is_link() {
            return Ok(Resolution {
                value: next.clone(),
                remainder_path: segments[i + 1..].join("/"),
            });
        }
        current = next;
    }

    Ok(Resolution {
        value: current.clone(),
        remainder_path: String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cid::compute_cid;
    use crate::model::{Input, Output, TransactionBuilder};

    fn hash() -> String {
        "0".repeat(64)
    }

    fn encoded() -> Vec<u8> {
        TransactionBuilder::new(hash(), 1_600_000_000_000)
            .reward("minted")
            .input(Input::new(0, hash(), 150, hash(), "ab"))
            .output(Output::new(0, 150, hash()))
            .build()
            .serialize()
            .unwrap()
    }

    #[test]
    fn test_root_paths_return_record() {
        let bytes = encoded();
        let whole = decode_node(&bytes, SchemaVersion::V2).unwrap();
        for path in ["", "/", "//"] {
            let res = resolve(&bytes, path).unwrap();
            assert_eq!(res.value, whole);
            assert_eq!(res.remainder_path, "");
        }
    }

    #[test]
    fn test_resolve_field() {
        let res = resolve(&encoded(), "reward").unwrap();
        assert_eq!(res.value, Node::String("minted".to_string()));
        assert_eq!(res.remainder_path, "");

        let res = resolve(&encoded(), "/inputs/0/signature").unwrap();
        assert_eq!(res.value.as_str(), Some("ab"));

        let res = resolve(&encoded(), "outputs/0/amount/").unwrap();
        assert_eq!(res.value.as_u64(), Some(150));
    }

    #[test]
    fn test_missing_field() {
        let err = resolve(&encoded(), "nonce").unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingField {
                field: "nonce".to_string(),
                record: "LFCTx".to_string()
            }
        );
        assert_eq!(err.to_string(), "LFCTx has no property 'nonce'");

        let err = resolve(&encoded(), "outputs/3").unwrap_err();
        assert_eq!(
            err,
            ResolveError::MissingField {
                field: "3".to_string(),
                record: "list".to_string()
            }
        );

        // Leaves have no children.
        let err = resolve(&encoded(), "reward/length").unwrap_err();
        assert!(matches!(err, ResolveError::MissingField { record, .. } if record == "string"));
    }

    #[test]
    fn test_list_index_must_be_canonical() {
        let bytes = encoded();
        for (path, field) in [("inputs/00", "00"), ("inputs/+0/tx", "+0"), ("outputs/01", "01")] {
            assert_eq!(
                resolve(&bytes, path),
                Err(ResolveError::MissingField {
                    field: field.to_string(),
                    record: "list".to_string()
                }),
                "{path}"
            );
        }
        assert!(resolve(&bytes, "inputs/0/tx").is_ok());
    }

    #[test]
    fn test_decode_failure_propagates() {
        assert!(matches!(resolve(&[0x0a], "id"), Err(ResolveError::Decode(_))));
    }

    #[test]
    fn test_link_halts_resolution() {
        let link = *compute_cid(b"previous").as_cid();
        let node = Node::record("LFCBlock")
            .with_field("index", 4u64.into())
            .with_field("prev", link.into());

        let res = resolve_node(&node, "prev/transactions/0/id").unwrap();
        assert_eq!(res.value, Node::Link(link));
        assert_eq!(res.remainder_path, "transactions/0/id");

        let res = resolve_node(&node, "prev").unwrap();
        assert_eq!(res.remainder_path, "");
    }
}
