//! Collapse tail-constructor call chains through a synthetic namespace.

use regex::Regex;

use super::{block, call, dot, name, object, stat, var};
use crate::node::Node;
use crate::pattern::Pattern;

/// The synthetic object rewritten constructions are called through.
pub const NAMESPACE_IDENT: &str = "__NAMESPACE";

/// Rewrites zero-argument "tail constructor" calls into direct calls through
/// [`NAMESPACE_IDENT`], turning `expr.Foo()` into `__NAMESPACE.Foo(expr)`.
///
/// Component modules build instances by chaining a capitalized constructor
/// method off a properties expression; resolving that method through the
/// prototype chain on every construction is what this pass eliminates. Two
/// shapes are recognized:
///
/// - A call `expr.Name()` where `Name` starts with an uppercase ASCII letter
///   (underscore-prefixed and lowercase members are left alone) becomes
///   `__NAMESPACE.Name(expr)`, with `expr` itself re-optimized first.
/// - A statement `alias.using(...)` becomes a block that declares
///   `__NAMESPACE` as an empty object, populates it via
///   `alias.populateNamespace(__NAMESPACE)`, and then retains the original
///   statement.
///
/// # Examples
///
/// ```text
/// {x: 1}.Foo()            =>  __NAMESPACE.Foo({x: 1})
/// a.Foo().Bar()           =>  __NAMESPACE.Bar(__NAMESPACE.Foo(a))
/// list.foo()              =>  unchanged (not capitalized)
/// w._Hidden()             =>  unchanged (underscore prefix)
/// F.using("Dom", "Ui");   =>  var __NAMESPACE = {};
///                             F.populateNamespace(__NAMESPACE);
///                             F.using("Dom", "Ui");
/// ```
pub struct TailConstructionOptimizer {
    call_query: Pattern,
    using_query: Pattern,
    constructor_name: Regex,
}

impl TailConstructionOptimizer {
    pub fn new() -> Self {
        // ["call", ["dot", receiver, member], args]
        let call_query = Pattern::fields([
            ("op", Pattern::literal("call")),
            (
                "callee",
                Pattern::fields([
                    ("op", Pattern::literal("dot")),
                    ("receiver", Pattern::any()),
                    ("member", Pattern::any()),
                ]),
            ),
            ("args", Pattern::any()),
        ]);

        // ["stat", ["call", ["dot", ["name", alias], "using"], args]]
        let using_query = Pattern::fields([
            ("op", Pattern::literal("stat")),
            (
                "expr",
                Pattern::fields([
                    ("op", Pattern::literal("call")),
                    (
                        "callee",
                        Pattern::fields([
                            ("op", Pattern::literal("dot")),
                            (
                                "receiver",
                                Pattern::fields([
                                    ("op", Pattern::literal("name")),
                                    ("id", Pattern::any()),
                                ]),
                            ),
                            ("member", Pattern::literal("using")),
                        ]),
                    ),
                    ("args", Pattern::any()),
                ]),
            ),
        ]);

        // Tail constructor names start with an uppercase ASCII letter, which
        // also rules out underscore-prefixed members.
        let constructor_name = Regex::new("^[A-Z]").expect("constructor name pattern");

        TailConstructionOptimizer {
            call_query,
            using_query,
            constructor_name,
        }
    }

    /// Optimize a tree, returning its rewritten form.
    ///
    /// This pass walks top-down with its own recursion rather than the
    /// generic post-order walker: a matched tail call is rewritten first and
    /// only then is its receiver descended into, so the rewrite decision for
    /// a chain's outer call is made on the unrewritten chain. Sequence nodes
    /// that match neither query keep their identity and have each child
    /// optimized in place; terminals pass through unchanged.
    pub fn optimize(&self, node: &Node) -> Node {
        if let Some(rewritten) = self.rewrite_tail_call(node) {
            return rewritten;
        }
        if let Some(rewritten) = self.expand_using(node) {
            return rewritten;
        }
        if let Node::Seq(seq) = node {
            for index in 0..seq.len() {
                if let Some(child) = seq.child(index) {
                    seq.set_child(index, self.optimize(&child));
                }
            }
        }
        node.clone()
    }

    /// `expr.Name()` => `__NAMESPACE.Name(optimize(expr))`, when `Name` is a
    /// tail constructor name and the call carries no arguments.
    fn rewrite_tail_call(&self, node: &Node) -> Option<Node> {
        let capture = self.call_query.captures(node)?;
        let bindings = capture.as_bindings()?;

        let callee = bindings.get("callee")?.as_nested()?;
        let member = callee.get("member")?.as_node()?.as_str()?;
        if !self.constructor_name.is_match(member) {
            return None;
        }
        let args = bindings.get("args")?.as_node()?.as_seq()?;
        if !args.is_empty() {
            return None;
        }

        let receiver = callee.get("receiver")?.as_node()?.clone();
        Some(call(
            dot(name(NAMESPACE_IDENT), member),
            [self.optimize(&receiver)],
        ))
    }

    /// `alias.using(...)` statement => block declaring and populating
    /// `__NAMESPACE`, followed by the original statement itself.
    fn expand_using(&self, node: &Node) -> Option<Node> {
        let capture = self.using_query.captures(node)?;
        let bindings = capture.as_bindings()?;

        let callee = bindings.get("expr")?.as_nested()?.get("callee")?.as_nested()?;
        let alias = callee.get("receiver")?.as_nested()?.get("id")?.as_node()?.as_str()?;

        Some(block([
            var(NAMESPACE_IDENT, object([])),
            stat(call(
                dot(name(alias), "populateNamespace"),
                [name(NAMESPACE_IDENT)],
            )),
            node.clone(),
        ]))
    }
}

impl Default for TailConstructionOptimizer {
    fn default() -> Self {
        TailConstructionOptimizer::new()
    }
}
