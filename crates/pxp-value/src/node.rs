use std::fmt;

/// A node in a parsed CSS value.
///
/// Every variant keeps the exact source text it was built from, so
/// serializing a freshly parsed [`Value`] reproduces the input byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// Anything that is not one of the other kinds: `red`, `#fff`, `50%`, `*`.
    Word(String),

    /// A number with a unit: `2pxp`, `-1.5px`. `number` keeps its source
    /// spelling, sign and exponent included.
    Dimension { number: String, unit: String },

    /// A run of whitespace between two nodes.
    Space(String),

    /// A quoted string. `value` is the raw text between the quotes, escapes included.
    Str {
        quote: char,
        value: String,
        unclosed: bool,
    },

    /// A divider (`,` `/` `:`) together with the whitespace around it.
    Div {
        value: char,
        before: String,
        after: String,
    },

    /// A `/* ... */` comment.
    Comment { value: String, unclosed: bool },

    /// A function call such as `calc(...)` or `var(--x)`.
    /// An empty `name` is a bare parenthesized group.
    Function {
        name: String,
        before: String,
        after: String,
        nodes: Vec<ValueNode>,
        unclosed: bool,
    },
}

impl ValueNode {
    pub fn word(value: impl Into<String>) -> Self {
        ValueNode::Word(value.into())
    }

    pub fn dimension(number: impl Into<String>, unit: impl Into<String>) -> Self {
        ValueNode::Dimension {
            number: number.into(),
            unit: unit.into(),
        }
    }

    pub fn space() -> Self {
        ValueNode::Space(" ".into())
    }

    pub fn function(name: impl Into<String>, nodes: Vec<ValueNode>) -> Self {
        ValueNode::Function {
            name: name.into(),
            before: String::new(),
            after: String::new(),
            nodes,
            unclosed: false,
        }
    }
}

impl fmt::Display for ValueNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueNode::Word(value) | ValueNode::Space(value) => f.write_str(value),
            ValueNode::Dimension { number, unit } => write!(f, "{number}{unit}"),
            ValueNode::Str {
                quote,
                value,
                unclosed,
            } => {
                write!(f, "{quote}{value}")?;
                if !unclosed {
                    write!(f, "{quote}")?;
                }
                Ok(())
            }
            ValueNode::Div {
                value,
                before,
                after,
            } => write!(f, "{before}{value}{after}"),
            ValueNode::Comment { value, unclosed } => {
                write!(f, "/*{value}")?;
                if !unclosed {
                    f.write_str("*/")?;
                }
                Ok(())
            }
            ValueNode::Function {
                name,
                before,
                after,
                nodes,
                unclosed,
            } => {
                write!(f, "{name}({before}")?;
                for node in nodes {
                    write!(f, "{node}")?;
                }
                f.write_str(after)?;
                if !unclosed {
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

/// What [`Value::walk_mut`] does after the callback returns for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkAction {
    /// Descend into the node's children, if any.
    Continue,
    /// Leave the node's children alone. Used after replacing a node so
    /// the replacement is not visited again.
    Skip,
}

/// A parsed CSS value: the top-level node list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Value {
    pub nodes: Vec<ValueNode>,
}

impl Value {
    pub fn new(nodes: Vec<ValueNode>) -> Self {
        Self { nodes }
    }

    /// Visit every node pre-order, descending into function arguments.
    pub fn walk_mut<F>(&mut self, mut callback: F)
    where
        F: FnMut(&mut ValueNode) -> WalkAction,
    {
        walk_nodes(&mut self.nodes, &mut callback);
    }
}

fn walk_nodes<F>(nodes: &mut [ValueNode], callback: &mut F)
where
    F: FnMut(&mut ValueNode) -> WalkAction,
{
    for node in nodes {
        if callback(node) == WalkAction::Skip {
            continue;
        }
        if let ValueNode::Function { nodes, .. } = node {
            walk_nodes(nodes, callback);
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}
