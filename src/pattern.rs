use std::collections::HashMap;

use crate::node::Node;

/// A declarative description of the shape a node must have to match.
///
/// Patterns are built once and tested against many nodes. They come in three
/// forms:
///
/// - [`Pattern::Literal`] matches only a node identical to the held value
///   (terminal value equality, sequence handle equality).
/// - [`Pattern::Any`] matches any node at all and captures it.
/// - [`Pattern::Fields`] matches a sequence node positionally: the i-th named
///   slot must match the i-th child. Slot names exist purely to label what
///   the slot captured.
///
/// # Examples
///
/// ```
/// use graft::{Node, Pattern};
///
/// // ["call", ["a", "b"]]
/// let node = Node::seq([
///     Node::from("call"),
///     Node::seq([Node::from("a"), Node::from("b")]),
/// ]);
/// let query = Pattern::fields([
///     ("op", Pattern::literal("call")),
///     ("args", Pattern::any()),
/// ]);
///
/// let capture = query.captures(&node).unwrap();
/// let args = capture.as_bindings().unwrap().get("args").unwrap();
/// assert_eq!(
///     args.captured(),
///     &Node::seq([Node::from("a"), Node::from("b")]),
/// );
/// ```
#[derive(Debug, Clone)]
pub enum Pattern {
    /// Matches only a node identical to this value (the `===` test)
    Literal(Node),

    /// Wildcard: matches any node, terminal or sequence, and captures it
    Any,

    /// Named positional slots matched against a sequence node's children.
    /// Slot order defines the child index each sub-pattern applies to.
    Fields(Vec<(String, Pattern)>),
}

impl Pattern {
    /// Build a literal pattern from anything convertible to a node.
    pub fn literal(value: impl Into<Node>) -> Pattern {
        Pattern::Literal(value.into())
    }

    /// Build the wildcard pattern.
    pub fn any() -> Pattern {
        Pattern::Any
    }

    /// Build a positional-slot pattern from `(name, sub-pattern)` pairs.
    /// Pair order defines which child each sub-pattern is matched against.
    pub fn fields<N: Into<String>>(slots: impl IntoIterator<Item = (N, Pattern)>) -> Pattern {
        Pattern::Fields(
            slots
                .into_iter()
                .map(|(name, sub)| (name.into(), sub))
                .collect(),
        )
    }

    /// Match a node against this pattern, returning what was captured.
    ///
    /// `None` is the normal "does not have this shape" answer, used
    /// pervasively for control flow; the matcher itself never fails.
    ///
    /// # Matching rules
    ///
    /// 1. **Literal**: matched iff `node.identical(literal)`. Null and
    ///    undefined literals therefore match only identical null/undefined
    ///    nodes, never substructure, and a literal holding a sequence
    ///    matches only that same handle.
    ///
    /// 2. **Any**: always matched; captures the node as-is.
    ///
    /// 3. **Fields against a sequence**: a pattern with more slots than the
    ///    sequence has children is an immediate non-match (arity
    ///    contradiction — never a partial match). Otherwise each slot is
    ///    matched against the child at its position, in slot order, and the
    ///    first failing slot fails the whole pattern. There is no
    ///    backtracking; this is a single deterministic pass. A pattern with
    ///    fewer slots than children matches the child prefix.
    ///
    /// 4. **Fields against a terminal**: non-match.
    ///
    /// Successful `Fields` matches capture a [`Bindings`] carrying one
    /// [`Binding`] per slot plus the exact subtree the pattern matched.
    pub fn captures(&self, node: &Node) -> Option<Capture> {
        match self {
            Pattern::Literal(literal) => {
                if node.identical(literal) {
                    Some(Capture::Value(node.clone()))
                } else {
                    None
                }
            }

            Pattern::Any => Some(Capture::Value(node.clone())),

            Pattern::Fields(slots) => {
                let seq = node.as_seq()?;
                if slots.len() > seq.len() {
                    return None;
                }

                let mut bound = HashMap::new();
                for (index, (name, sub)) in slots.iter().enumerate() {
                    let child = seq.child(index)?;
                    let binding = match sub.captures(&child)? {
                        Capture::Value(value) => Binding::Value(value),
                        Capture::Bindings(nested) => Binding::Nested(nested),
                    };
                    bound.insert(name.clone(), binding);
                }

                Some(Capture::Bindings(Bindings {
                    slots: bound,
                    node: node.clone(),
                }))
            }
        }
    }

    /// Check whether a node has this pattern's shape, discarding captures.
    pub fn is_match(&self, node: &Node) -> bool {
        self.captures(node).is_some()
    }
}

/// What a successful match captured.
#[derive(Debug, Clone, PartialEq)]
pub enum Capture {
    /// The matched node itself, from a literal or wildcard pattern
    Value(Node),

    /// Named captures from a `Fields` pattern
    Bindings(Bindings),
}

impl Capture {
    /// The node this capture was taken from, whichever variant it is.
    pub fn node(&self) -> &Node {
        match self {
            Capture::Value(node) => node,
            Capture::Bindings(bindings) => bindings.node(),
        }
    }

    /// Get the named captures, if this came from a `Fields` pattern.
    pub fn as_bindings(&self) -> Option<&Bindings> {
        match self {
            Capture::Bindings(bindings) => Some(bindings),
            Capture::Value(_) => None,
        }
    }

    /// Consume the capture into its named captures, if any.
    pub fn into_bindings(self) -> Option<Bindings> {
        match self {
            Capture::Bindings(bindings) => Some(bindings),
            Capture::Value(_) => None,
        }
    }
}

/// The named captures of one `Fields` match, plus the exact subtree the
/// pattern matched, so a rewrite callback can always recover the node it
/// matched against no matter how deep the binding structure goes.
#[derive(Debug, Clone, PartialEq)]
pub struct Bindings {
    slots: HashMap<String, Binding>,
    node: Node,
}

impl Bindings {
    /// Look up a slot capture by name.
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.slots.get(name)
    }

    /// The subtree this set of bindings was captured from.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Number of captured slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check whether the pattern had no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// A single slot's capture.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    /// The child node captured by a literal or wildcard slot
    Value(Node),

    /// Named captures of a nested `Fields` slot (which carry the child
    /// subtree they matched)
    Nested(Bindings),
}

impl Binding {
    /// Get the captured node, if this slot captured a plain value.
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Binding::Value(node) => Some(node),
            Binding::Nested(_) => None,
        }
    }

    /// Get the nested captures, if this slot held a `Fields` sub-pattern.
    pub fn as_nested(&self) -> Option<&Bindings> {
        match self {
            Binding::Nested(bindings) => Some(bindings),
            Binding::Value(_) => None,
        }
    }

    /// The subtree this slot matched, whichever variant it is.
    pub fn captured(&self) -> &Node {
        match self {
            Binding::Value(node) => node,
            Binding::Nested(bindings) => bindings.node(),
        }
    }
}
