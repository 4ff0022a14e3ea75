//! Execute rewrite passes against JSON-encoded trees

use crate::convert::{json_to_node, node_to_json};
use crate::rules::{StyleExportsStripper, TailConstructionOptimizer};
use super::CliError;

/// Options for a pass invocation
#[derive(Debug, Clone, Default)]
pub struct PassOptions {
    /// JSON-encoded input tree
    pub input: Option<String>,
    /// Pretty-print the output
    pub pretty: bool,
}

/// Which rewrite pass to run over the input tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Collapse tail-constructor chains and expand using-statements
    Optimize,
    /// Replace style-export assignments with empty object literals
    StripStyles,
    /// Optimize, then strip style exports
    Process,
}

/// Execute a rewrite pass over the JSON tree in `options.input`
pub fn execute_pass(pass: Pass, options: &PassOptions) -> Result<serde_json::Value, CliError> {
    let json_str = options.input.as_ref().ok_or(CliError::NoInput)?;

    let json_value: serde_json::Value =
        serde_json::from_str(json_str).map_err(CliError::Json)?;

    let tree = json_to_node(json_value).map_err(CliError::Convert)?;

    let rewritten = match pass {
        Pass::Optimize => TailConstructionOptimizer::new().optimize(&tree),
        Pass::StripStyles => StyleExportsStripper::new().strip(&tree),
        Pass::Process => {
            let optimized = TailConstructionOptimizer::new().optimize(&tree);
            StyleExportsStripper::new().strip(&optimized)
        }
    };

    Ok(node_to_json(rewritten))
}
