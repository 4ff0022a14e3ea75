//! Strip style-export assignments out of compiled modules.

use super::{assign, dot, name, object, stat};
use crate::node::Node;
use crate::pattern::Pattern;
use crate::rewrite::walk_post_order;

/// Replaces every `styleExports` assignment with an assignment of an empty
/// object literal.
///
/// Component modules export their stylesheet as a `styleExports` object; the
/// build step renders it to a companion `.css` file and then has no use for
/// the object at runtime, so this pass discards the right-hand side while
/// keeping the assignment itself in place. Both access chains are
/// recognized:
///
/// ```text
/// module.exports.styleExports = {...};
/// exports.styleExports = {...};
/// ```
///
/// and either form normalizes to
///
/// ```text
/// module.exports.styleExports = {};
/// ```
///
/// Every match is stripped independently — there is no requirement that a
/// module contain exactly one. Assignments to any other property pass
/// through untouched.
pub struct StyleExportsStripper {
    module_exports_query: Pattern,
    exports_query: Pattern,
}

impl StyleExportsStripper {
    pub fn new() -> Self {
        // ["stat", ["assign", true, ["dot", owner, "styleExports"], rhs]]
        // with owner = module.exports or exports.
        let module_exports_query = Pattern::fields([
            ("op", Pattern::literal("stat")),
            (
                "assignment",
                Pattern::fields([
                    ("op", Pattern::literal("assign")),
                    ("plain", Pattern::literal(true)),
                    (
                        "target",
                        Pattern::fields([
                            ("op", Pattern::literal("dot")),
                            (
                                "owner",
                                Pattern::fields([
                                    ("op", Pattern::literal("dot")),
                                    (
                                        "root",
                                        Pattern::fields([
                                            ("op", Pattern::literal("name")),
                                            ("id", Pattern::literal("module")),
                                        ]),
                                    ),
                                    ("member", Pattern::literal("exports")),
                                ]),
                            ),
                            ("member", Pattern::literal("styleExports")),
                        ]),
                    ),
                    ("value", Pattern::any()),
                ]),
            ),
        ]);

        let exports_query = Pattern::fields([
            ("op", Pattern::literal("stat")),
            (
                "assignment",
                Pattern::fields([
                    ("op", Pattern::literal("assign")),
                    ("plain", Pattern::literal(true)),
                    (
                        "target",
                        Pattern::fields([
                            ("op", Pattern::literal("dot")),
                            (
                                "owner",
                                Pattern::fields([
                                    ("op", Pattern::literal("name")),
                                    ("id", Pattern::literal("exports")),
                                ]),
                            ),
                            ("member", Pattern::literal("styleExports")),
                        ]),
                    ),
                    ("value", Pattern::any()),
                ]),
            ),
        ]);

        StyleExportsStripper {
            module_exports_query,
            exports_query,
        }
    }

    /// Strip every style-export assignment in the tree, returning the
    /// rewritten root.
    ///
    /// Driven through the generic post-order walker: replacements are leaf
    /// statements, so visiting order does not matter, and the walker's
    /// in-place splice keeps each statement node's identity while its
    /// contents become the normalized form.
    pub fn strip(&self, root: &Node) -> Node {
        walk_post_order(root, |node| {
            if self.module_exports_query.is_match(node) || self.exports_query.is_match(node) {
                normalized_style_exports()
            } else {
                node.clone()
            }
        })
    }
}

impl Default for StyleExportsStripper {
    fn default() -> Self {
        StyleExportsStripper::new()
    }
}

/// The normalized statement: `module.exports.styleExports = {};`
fn normalized_style_exports() -> Node {
    stat(assign(
        dot(dot(name("module"), "exports"), "styleExports"),
        object([]),
    ))
}
