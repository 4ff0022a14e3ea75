use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A tree value used throughout the rewriting engine.
///
/// This type represents the array-encoded syntax trees an external parser
/// hands to the engine: internal nodes are ordered sequences of children,
/// leaves are atomic terminals. The engine has no notion of what the nodes
/// *mean* — rule sets assign meaning by shape.
///
/// # Identity
///
/// Sequence nodes have stable identity: cloning a `Node::Seq` clones a shared
/// handle, not the children. Replacing a sequence's contents through one
/// handle is observed by every other holder of that handle, which is how the
/// rewrite walker propagates replacements to the rest of a tree.
///
/// # Examples
///
/// ```
/// use graft::Node;
///
/// // Terminals
/// let null = Node::Null;
/// let tag = Node::from("dot");
/// let count = Node::from(42i64);
///
/// // The sequence node for `module.exports`:
/// // ["dot", ["name", "module"], "exports"]
/// let access = Node::seq([
///     Node::from("dot"),
///     Node::seq([Node::from("name"), Node::from("module")]),
///     Node::from("exports"),
/// ]);
/// assert!(access.is_seq());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Absent value (JavaScript `undefined`)
    Undefined,

    /// JavaScript `null`
    Null,

    /// Boolean terminal
    Bool(bool),

    /// Integer terminal (preserved separately from floats)
    Int(i64),

    /// Floating-point terminal
    Float(f64),

    /// UTF-8 string terminal
    Str(String),

    /// Sequence node: an ordered collection of children behind a shared,
    /// mutable handle
    Seq(Seq),
}

impl Node {
    /// Build a sequence node from an iterator of children.
    pub fn seq(children: impl IntoIterator<Item = Node>) -> Node {
        Node::Seq(Seq::from_vec(children.into_iter().collect()))
    }

    /// Build an empty sequence node.
    pub fn empty_seq() -> Node {
        Node::Seq(Seq::new())
    }

    /// Check whether the node is a sequence (terminals are never recursed into)
    pub fn is_seq(&self) -> bool {
        matches!(self, Node::Seq(_))
    }

    /// Get the sequence handle, if this is a sequence node
    pub fn as_seq(&self) -> Option<&Seq> {
        match self {
            Node::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    /// Get the string contents, if this is a string terminal
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Strict identity, the engine's analogue of JavaScript `===`.
    ///
    /// Terminals are identical when they hold equal values of the same kind:
    /// `Int(1)` is never identical to `Float(1.0)`, and `Float(NAN)` is never
    /// identical to anything. Sequences are identical only when they are the
    /// *same handle* — two structurally equal sequences built separately do
    /// not compare identical.
    ///
    /// Structural deep equality is available through `==` instead.
    pub fn identical(&self, other: &Node) -> bool {
        match (self, other) {
            (Node::Seq(a), Node::Seq(b)) => a.ptr_eq(b),
            _ => self == other,
        }
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Node {
        Node::Bool(b)
    }
}

impl From<i64> for Node {
    fn from(n: i64) -> Node {
        Node::Int(n)
    }
}

impl From<f64> for Node {
    fn from(n: f64) -> Node {
        Node::Float(n)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Node {
        Node::Str(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Node {
        Node::Str(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(children: Vec<Node>) -> Node {
        Node::Seq(Seq::from_vec(children))
    }
}

impl From<Seq> for Node {
    fn from(seq: Seq) -> Node {
        Node::Seq(seq)
    }
}

/// An ordered, indexable collection of child nodes behind a shared handle.
///
/// `Seq` is the mutable half of the data model: its contents can be replaced
/// wholesale while the handle itself survives, so references captured before
/// a rewrite observe the rewritten children afterwards. Cloning a `Seq` is
/// cheap and yields another handle to the same children.
#[derive(Clone, Default)]
pub struct Seq(Rc<RefCell<Vec<Node>>>);

impl Seq {
    /// Create an empty sequence.
    pub fn new() -> Seq {
        Seq::default()
    }

    /// Create a sequence holding the given children.
    pub fn from_vec(children: Vec<Node>) -> Seq {
        Seq(Rc::new(RefCell::new(children)))
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Check whether the sequence has no children.
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Get a clone of the child at `index`, or `None` when out of bounds.
    pub fn child(&self, index: usize) -> Option<Node> {
        self.0.borrow().get(index).cloned()
    }

    /// Overwrite the child at `index`.
    ///
    /// # Panics
    ///
    /// Panics when `index` is out of bounds, like `Vec` indexing.
    pub fn set_child(&self, index: usize, node: Node) {
        self.0.borrow_mut()[index] = node;
    }

    /// Append a child.
    pub fn push(&self, node: Node) {
        self.0.borrow_mut().push(node);
    }

    /// Snapshot of the current children.
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().clone()
    }

    /// Handle identity: do both values refer to the same sequence?
    pub fn ptr_eq(&self, other: &Seq) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Replace this sequence's children with a snapshot of `replacement`'s,
    /// keeping this handle alive so every holder observes the new contents.
    ///
    /// A no-op when `replacement` is the same handle. The snapshot is taken
    /// before the overwrite, so a replacement that contains this sequence
    /// does not trip the interior mutability; the self-referential tree it
    /// produces is the caller's bug to avoid.
    pub fn replace_contents(&self, replacement: &Seq) {
        if self.ptr_eq(replacement) {
            return;
        }
        let items = replacement.0.borrow().clone();
        *self.0.borrow_mut() = items;
    }
}

impl PartialEq for Seq {
    fn eq(&self, other: &Seq) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        *self.0.borrow() == *other.0.borrow()
    }
}

impl fmt::Debug for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.borrow().iter()).finish()
    }
}
