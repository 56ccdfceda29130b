//! `pxp` → `calc()` rewrite over a parsed CSS value.

use crate::node::{ValueNode, WalkAction};
use crate::options::{PxpOptions, PXP_UNIT};
use crate::parser::ValueParser;

/// Rewrite every `<n>pxp` dimension in a CSS value into a scale expression.
///
/// Other dimensions, and everything that is not a dimension, come back
/// exactly as they went in.
pub fn transform_pxp(value: &str, options: &PxpOptions) -> String {
    let mut parsed = ValueParser::parse(value);
    let mut rewritten = 0usize;

    parsed.walk_mut(|node| {
        let replacement = match node {
            ValueNode::Dimension { number, unit } if unit.as_str() == PXP_UNIT => {
                Some(scale_node(number, options))
            }
            _ => None,
        };

        match replacement {
            Some(calc) => {
                *node = calc;
                rewritten += 1;
                WalkAction::Skip
            }
            None => WalkAction::Continue,
        }
    });

    let output = parsed.to_string();
    if rewritten > 0 {
        tracing::debug!(input = value, output = %output, rewritten, "transformed pxp value");
    }
    output
}

/// Build `calc(<number>px * var(<name>) / <default>)` as a node.
fn scale_node(number: &str, options: &PxpOptions) -> ValueNode {
    ValueNode::function(
        "calc",
        vec![
            ValueNode::word(format!("{number}px")),
            ValueNode::space(),
            ValueNode::word("*"),
            ValueNode::space(),
            ValueNode::function("var", vec![ValueNode::word(options.variable_name())]),
            ValueNode::space(),
            ValueNode::word("/"),
            ValueNode::space(),
            ValueNode::word(options.default_value()),
        ],
    )
}
