#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod node;
pub mod pattern;
pub mod rewrite;
pub mod rules;

pub use convert::{ConvertError, json_to_node, node_to_json};
pub use node::{Node, Seq};
pub use pattern::{Binding, Bindings, Capture, Pattern};
pub use rewrite::{find_all, find_first, find_top_level, try_walk_post_order, walk_post_order};
pub use rules::{NAMESPACE_IDENT, StyleExportsStripper, TailConstructionOptimizer};
