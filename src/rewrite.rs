//! Post-order tree transformation and pattern-driven search.
//!
//! The walker applies a caller-supplied transform to every node of a tree in
//! dependency order: a node is transformed only after all of its descendants
//! have been. Replacement is by in-place splice — when the transform returns
//! a *different* sequence for a sequence node, the original sequence's
//! contents are overwritten so that every holder of the original handle
//! (crucially, the node's parent) observes the rewrite. This is the only way
//! a non-root replacement propagates; the transform's return value is used
//! directly only for the root.
//!
//! The search primitives walk pre-order, testing each node before its
//! children, and differ only in how much they return:
//!
//! - [`find_first`] — the first match anywhere, or `None`
//! - [`find_top_level`] — every match not nested inside another match
//! - [`find_all`] — every match, nested or not

use std::convert::Infallible;

use crate::node::Node;
use crate::pattern::Pattern;

/// Apply `transform` to every node, descendants strictly before ancestors,
/// and return the (possibly new) root.
///
/// Traversal uses explicit stacks rather than native recursion, so tree
/// depth is not bounded by the control stack. Discovery runs to completion
/// before any transform is invoked; nodes introduced *by* a transform are
/// not themselves walked.
///
/// # Examples
///
/// ```
/// use graft::{walk_post_order, Node, Pattern};
///
/// // Normalize every ["name", _] node to ["name", "x"].
/// let query = Pattern::fields([
///     ("op", Pattern::literal("name")),
///     ("id", Pattern::any()),
/// ]);
/// let tree = Node::seq([
///     Node::from("call"),
///     Node::seq([Node::from("name"), Node::from("f")]),
///     Node::seq([Node::from("name"), Node::from("g")]),
/// ]);
///
/// let rewritten = walk_post_order(&tree, |node| {
///     if query.is_match(node) {
///         Node::seq([Node::from("name"), Node::from("x")])
///     } else {
///         node.clone()
///     }
/// });
///
/// assert_eq!(
///     rewritten,
///     Node::seq([
///         Node::from("call"),
///         Node::seq([Node::from("name"), Node::from("x")]),
///         Node::seq([Node::from("name"), Node::from("x")]),
///     ]),
/// );
/// ```
pub fn walk_post_order(root: &Node, mut transform: impl FnMut(&Node) -> Node) -> Node {
    match try_walk_post_order::<Infallible, _>(root, |node| Ok(transform(node))) {
        Ok(node) => node,
        Err(never) => match never {},
    }
}

/// Fallible [`walk_post_order`]: the first error aborts the walk and
/// propagates unmodified.
///
/// There is no retry and no partial-result recovery — nodes transformed
/// before the failure keep their rewrites, so callers wanting all-or-nothing
/// behavior should fall back to the tree they passed in.
pub fn try_walk_post_order<E, F>(root: &Node, mut transform: F) -> Result<Node, E>
where
    F: FnMut(&Node) -> Result<Node, E>,
{
    // Discovery pass: every node lands on `ordered` before its children do,
    // so draining `ordered` back-to-front yields descendants first.
    let mut work = vec![root.clone()];
    let mut ordered: Vec<Node> = Vec::new();
    while let Some(node) = work.pop() {
        if let Node::Seq(seq) = &node {
            work.extend(seq.children());
        }
        ordered.push(node);
    }

    // Transform pass: the root was pushed first, so it drains last and its
    // outcome is what the walk returns.
    let mut outcome = root.clone();
    while let Some(node) = ordered.pop() {
        let transformed = transform(&node)?;
        if let (Node::Seq(original), Node::Seq(replacement)) = (&node, &transformed) {
            if !original.ptr_eq(replacement) {
                original.replace_contents(replacement);
                outcome = node.clone();
                continue;
            }
        }
        outcome = transformed;
    }
    Ok(outcome)
}

/// Find the first node matching `query`, testing each node before its
/// children and children left to right. `None` when nothing in the tree
/// matches.
pub fn find_first(node: &Node, query: &Pattern) -> Option<Node> {
    if query.is_match(node) {
        return Some(node.clone());
    }
    if let Node::Seq(seq) = node {
        for child in seq.children() {
            if let Some(found) = find_first(&child, query) {
                return Some(found);
            }
        }
    }
    None
}

/// Find every match not nested inside another returned match: once a node
/// matches it is recorded and its descendants are not searched, while
/// non-matching sequences are descended as usual.
pub fn find_top_level(node: &Node, query: &Pattern) -> Vec<Node> {
    let mut matches = Vec::new();
    collect_top_level(node, query, &mut matches);
    matches
}

fn collect_top_level(node: &Node, query: &Pattern, matches: &mut Vec<Node>) {
    if query.is_match(node) {
        matches.push(node.clone());
        return;
    }
    if let Node::Seq(seq) = node {
        for child in seq.children() {
            collect_top_level(&child, query, matches);
        }
    }
}

/// Find every matching node anywhere in the tree. A matching ancestor does
/// not suppress matching descendants.
pub fn find_all(node: &Node, query: &Pattern) -> Vec<Node> {
    let mut matches = Vec::new();
    collect_all(node, query, &mut matches);
    matches
}

fn collect_all(node: &Node, query: &Pattern, matches: &mut Vec<Node>) {
    if query.is_match(node) {
        matches.push(node.clone());
    }
    if let Node::Seq(seq) = node {
        for child in seq.children() {
            collect_all(&child, query, matches);
        }
    }
}
