//! JSON <-> tree-node conversion at the engine boundary.
//!
//! The external parser and code generator exchange trees with this engine as
//! JSON: arrays are sequence nodes, scalars are terminals. JSON objects have
//! no counterpart — the array encoding spells object literals as
//! `["object", ...]` sequences — so converting one is an error rather than a
//! guess.

use std::fmt;

use crate::node::Node;

/// Errors raised while converting JSON into tree nodes.
#[derive(Debug)]
pub enum ConvertError {
    /// A JSON object appeared in the input tree
    UnsupportedObject,
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::UnsupportedObject => {
                write!(
                    f,
                    "JSON objects have no tree-node encoding; object literals are [\"object\", ...] arrays"
                )
            }
        }
    }
}

impl std::error::Error for ConvertError {}

/// Convert a serde_json::Value into a tree node.
pub fn json_to_node(value: serde_json::Value) -> Result<Node, ConvertError> {
    match value {
        serde_json::Value::Null => Ok(Node::Null),
        serde_json::Value::Bool(b) => Ok(Node::Bool(b)),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Node::Int(i))
            } else {
                Ok(Node::Float(n.as_f64().unwrap()))
            }
        }
        serde_json::Value::String(s) => Ok(Node::Str(s)),
        serde_json::Value::Array(items) => {
            let children = items
                .into_iter()
                .map(json_to_node)
                .collect::<Result<Vec<Node>, ConvertError>>()?;
            Ok(Node::from(children))
        }
        serde_json::Value::Object(_) => Err(ConvertError::UnsupportedObject),
    }
}

/// Convert a tree node into a serde_json::Value.
///
/// `Undefined` serializes as JSON null, as does a non-finite float.
pub fn node_to_json(node: Node) -> serde_json::Value {
    match node {
        Node::Undefined | Node::Null => serde_json::Value::Null,
        Node::Bool(b) => serde_json::Value::Bool(b),
        Node::Int(i) => serde_json::Value::Number(i.into()),
        Node::Float(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Node::Str(s) => serde_json::Value::String(s),
        Node::Seq(seq) => serde_json::Value::Array(
            seq.children().into_iter().map(node_to_json).collect(),
        ),
    }
}
