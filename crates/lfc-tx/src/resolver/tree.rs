//! Lazy enumeration of every path inside a record.

use std::vec;

use crate::codec::decode_node;
use crate::error::DecodeError;
use crate::model::Node;
use crate::schema::SchemaVersion;

struct Frame {
    prefix: Option<String>,
    children: vec::IntoIter<(String, Node)>,
}

/// Pre-order, depth-first iterator over the paths of a node.
///
/// Each call to [`traverse`] or [`tree`] builds its own iterator with its
/// own stack, so walks never interfere with each other.
pub struct Paths {
    stack: Vec<Frame>,
}

impl Iterator for Paths {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let frame = self.stack.last_mut()?;
            let Some((key, child)) = frame.children.next() else {
                self.stack.pop();
                continue;
            };

            let path = match &frame.prefix {
                Some(prefix) => format!("{}/{}", prefix, key),
                None => key,
            };
            if !child.is_leaf() {
                self.stack.push(Frame {
                    prefix: Some(path.clone()),
                    children: child.into_children().into_iter(),
                });
            }
            return Some(path);
        }
    }
}

/// Walks `node`, prefixing every emitted path with `prefix` when given.
///
/// Leaves (strings, integers, bytes, links, null) emit nothing.
pub fn traverse(node: &Node, prefix: Option<&str>) -> Paths {
    Paths {
        stack: vec![Frame {
            prefix: prefix.map(str::to_string),
            children: node.clone().into_children().into_iter(),
        }],
    }
}

/// Decodes `bytes` with the default schema and walks the record.
pub fn tree(bytes: &[u8]) -> Result<Paths, DecodeError> {
    tree_with_schema(bytes, SchemaVersion::default())
}

/// Decodes `bytes` with `schema` and walks the record.
pub fn tree_with_schema(bytes: &[u8], schema: SchemaVersion) -> Result<Paths, DecodeError> {
    let node = decode_node(bytes, schema)?;
    Ok(traverse(&node, None))
}
