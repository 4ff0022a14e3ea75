//! # Rewrite rule sets
//!
//! Concrete transformation passes expressed as query patterns plus rewrite
//! callbacks, driving the matcher and walker the way the surrounding build
//! pipeline does. The engine itself is shape-agnostic; these rules assign
//! meaning to the array encoding an external JavaScript parser produces:
//!
//! ```text
//! ["call", callee, [arg, ...]]          call expression
//! ["dot", object, "member"]             property access
//! ["name", "identifier"]                identifier reference
//! ["stat", expression]                  expression statement
//! ["assign", true, lvalue, rvalue]      plain assignment
//! ["object", [["key", value], ...]]     object literal
//! ["var", [["name", init], ...]]        variable declaration
//! ["block", [statement, ...]]           statement block
//! ["num", n] / ["string", "s"]          literals
//! ```
//!
//! Two passes are provided:
//!
//! - **[`TailConstructionOptimizer`]** collapses zero-argument calls to
//!   capitalized "tail constructor" methods into direct calls through a
//!   synthetic `__NAMESPACE` object, and expands `using(...)` statements to
//!   declare and populate that namespace.
//! - **[`StyleExportsStripper`]** replaces every `styleExports` assignment
//!   with an empty object literal, leaving the statement in place for the
//!   companion stylesheet step to key off.
//!
//! The constructors below build nodes in this encoding; the rule sets use
//! them for their replacement trees and tests use them for fixtures.

pub mod style_exports;
pub mod tail_construction;

pub use style_exports::StyleExportsStripper;
pub use tail_construction::{NAMESPACE_IDENT, TailConstructionOptimizer};

use crate::node::Node;

/// Build a call expression: `["call", callee, [arg, ...]]`.
pub fn call(callee: Node, args: impl IntoIterator<Item = Node>) -> Node {
    Node::seq([Node::from("call"), callee, Node::seq(args)])
}

/// Build a property access: `["dot", object, "member"]`.
pub fn dot(object: Node, member: &str) -> Node {
    Node::seq([Node::from("dot"), object, Node::from(member)])
}

/// Build an identifier reference: `["name", "identifier"]`.
pub fn name(identifier: &str) -> Node {
    Node::seq([Node::from("name"), Node::from(identifier)])
}

/// Build an expression statement: `["stat", expression]`.
pub fn stat(expression: Node) -> Node {
    Node::seq([Node::from("stat"), expression])
}

/// Build a plain assignment: `["assign", true, target, value]`.
pub fn assign(target: Node, value: Node) -> Node {
    Node::seq([Node::from("assign"), Node::from(true), target, value])
}

/// Build an object literal: `["object", [["key", value], ...]]`.
pub fn object<'a>(pairs: impl IntoIterator<Item = (&'a str, Node)>) -> Node {
    Node::seq([
        Node::from("object"),
        Node::seq(
            pairs
                .into_iter()
                .map(|(key, value)| Node::seq([Node::from(key), value])),
        ),
    ])
}

/// Build a single-declarator variable declaration: `["var", [[name, init]]]`.
pub fn var(identifier: &str, init: Node) -> Node {
    Node::seq([
        Node::from("var"),
        Node::seq([Node::seq([Node::from(identifier), init])]),
    ])
}

/// Build a statement block: `["block", [statement, ...]]`.
pub fn block(statements: impl IntoIterator<Item = Node>) -> Node {
    Node::seq([Node::from("block"), Node::seq(statements)])
}

/// Build a number literal: `["num", n]`.
pub fn num(value: i64) -> Node {
    Node::seq([Node::from("num"), Node::Int(value)])
}

/// Build a string literal: `["string", "s"]`.
pub fn string(value: &str) -> Node {
    Node::seq([Node::from("string"), Node::from(value)])
}
