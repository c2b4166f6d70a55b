//! Dynamic view of a decoded record.
//!
//! The resolver and tree walker navigate records through [`Node`] so they
//! work the same on any record layout, including values that link to other
//! records by CID.

use std::fmt;

use cid::Cid;

/// A decoded value.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Absent value.
    Null,
    /// Unsigned integer field.
    Integer(u64),
    /// String field.
    String(String),
    /// Raw byte buffer.
    Bytes(Vec<u8>),
    /// Content identifier of another record.
    Link(Cid),
    /// Repeated field; children are keyed by decimal index.
    List(Vec<Node>),
    /// Structured record; fields are kept in schema tag order.
    Record {
        kind: &'static str,
        fields: Vec<(&'static str, Node)>,
    },
}

impl Node {
    /// Creates an empty record of the given kind.
    pub fn record(kind: &'static str) -> Self {
        Node::Record {
            kind,
            fields: Vec::new(),
        }
    }

    /// Appends a field to a record node. No-op for other nodes.
    pub fn with_field(mut self, name: &'static str, value: Node) -> Self {
        if let Node::Record { fields, .. } = &mut self {
            fields.push((name, value));
        }
        self
    }

    /// Name of this node's type, as used in resolver errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Integer(_) => "integer",
            Node::String(_) => "string",
            Node::Bytes(_) => "bytes",
            Node::Link(_) => "link",
            Node::List(_) => "list",
            Node::Record { kind, .. } => *kind,
        }
    }

    /// True for values that are never descended into.
    pub fn is_leaf(&self) -> bool {
        !matches!(self, Node::List(_) | Node::Record { .. })
    }

    /// True if this node is a link to another record.
    pub fn is_link(&self) -> bool {
        matches!(self, Node::Link(_))
    }

    /// Looks up a direct child by key.
    ///
    /// Records match field names, lists match canonical decimal indices
    /// (`"0"`, `"12"`; never `"00"` or `"+0"`). Leaves have no children.
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Record { fields, .. } => fields
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value),
            Node::List(items) => key
                .parse::<usize>()
                .ok()
                .filter(|i| i.to_string() == key)
                .and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Number of direct children (0 for leaves).
    pub fn len(&self) -> usize {
        match self {
            Node::Record { fields, .. } => fields.len(),
            Node::List(items) => items.len(),
            _ => 0,
        }
    }

    /// True if this node has no children.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the node and returns its children with their keys.
    pub fn into_children(self) -> Vec<(String, Node)> {
        match self {
            Node::Record { fields, .. } => fields
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect(),
            Node::List(items) => items
                .into_iter()
                .enumerate()
                .map(|(i, value)| (i.to_string(), value))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Node::Integer(n) => Some(*n),
            _ => None,
        }
    }

}

impl From<u64> for Node {
    fn from(value: u64) -> Self {
        Node::Integer(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<Cid> for Node {
    fn from(value: Cid) -> Self {
        Node::Link(value)
    }
}

impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(value: Option<T>) -> Self {
        value.map_or(Node::Null, Into::into)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "null"),
            Node::Integer(n) => write!(f, "{}", n),
            Node::String(s) => write!(f, "{:?}", s),
            Node::Bytes(b) => write!(f, "0x{}", hex::encode(b)),
            Node::Link(cid) => write!(f, "{}", cid),
            Node::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Node::Record { kind, fields } => {
                write!(f, "{} {{", kind)?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, " {}: {}", name, value)?;
                }
                write!(f, " }}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node {
        Node::record("LFCTx")
            .with_field("id", "abc".into())
            .with_field(
                "outputs",
                Node::List(vec![Node::record("LFCOutput").with_field("amount", 150u64.into())]),
            )
    }

    #[test]
    fn test_get_by_name_and_index() {
        let node = sample();
        assert_eq!(node.get("id"), Some(&Node::String("abc".to_string())));
        let outputs = node.get("outputs").unwrap();
        assert_eq!(outputs.get("0").and_then(|o| o.get("amount")), Some(&Node::Integer(150)));
        assert!(outputs.get("1").is_none());
        assert!(outputs.get("first").is_none());
        assert!(outputs.get("00").is_none());
        assert!(outputs.get("+0").is_none());
        assert!(node.get("missing").is_none());
    }

    #[test]
    fn test_leaves_have_no_children() {
        let s = Node::from("abc");
        assert!(s.is_leaf());
        assert!(s.get("0").is_none());
        assert!(s.into_children().is_empty());
        assert!(Node::Integer(1).is_leaf());
        assert!(Node::Null.is_leaf());
        assert!(!sample().is_leaf());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(sample().kind_name(), "LFCTx");
        assert_eq!(Node::List(vec![]).kind_name(), "list");
        assert_eq!(Node::from(None::<u64>), Node::Null);
    }

    #[test]
    fn test_display() {
        let node = Node::record("LFCOutput")
            .with_field("index", 0u64.into())
            .with_field("address", "a".into());
        assert_eq!(node.to_string(), "LFCOutput { index: 0, address: \"a\" }");
    }
}
