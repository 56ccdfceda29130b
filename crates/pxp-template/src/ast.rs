//! Template compiler AST.
//!
//! Covers the subset of a template compiler's output that the pxp transform
//! touches: element nodes with their props, directives carrying expressions,
//! and expressions that are either one source string or a stream of text
//! segments and holes produced by identifier prefixing.

use std::fmt;

// ---------------------------------------------------------------------------
// Template nodes
// ---------------------------------------------------------------------------

/// A node in a compiled template.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateNode {
    /// The template root.
    Root(Vec<TemplateNode>),

    /// An element with props and children.
    Element(ElementNode),

    /// Static text content.
    Text(String),

    /// A `<!-- comment -->`.
    Comment(String),
}

/// An element such as `<div :style="...">`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: String,
    pub props: Vec<Prop>,
    pub children: Vec<TemplateNode>,
}

impl ElementNode {
    pub fn new(tag: impl Into<String>, props: Vec<Prop>) -> Self {
        Self {
            tag: tag.into(),
            props,
            children: Vec::new(),
        }
    }
}

/// An element prop: a static attribute or a directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Prop {
    Attribute(AttributeNode),
    Directive(DirectiveNode),
}

/// A static attribute: `class="box"`.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeNode {
    pub name: String,
    pub value: Option<String>,
}

/// A directive: `:style="..."`, `v-if="..."`, `@click="..."`.
///
/// `name` is the normalized directive name (`bind`, `if`, `on`) and
/// `raw_name` is exactly what appeared in the source (`:style`).
#[derive(Debug, Clone, PartialEq)]
pub struct DirectiveNode {
    pub name: String,
    pub raw_name: String,
    pub arg: Option<ExpressionNode>,
    pub exp: Option<ExpressionNode>,
    pub modifiers: Vec<String>,
}

impl DirectiveNode {
    /// A `:arg="exp"` binding.
    pub fn bind(arg: &str, exp: ExpressionNode) -> Self {
        Self {
            name: "bind".into(),
            raw_name: format!(":{arg}"),
            arg: Some(ExpressionNode::Simple(SimpleExpression::new(arg))),
            exp: Some(exp),
            modifiers: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Expressions
// ---------------------------------------------------------------------------

/// A directive expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionNode {
    /// One piece of source text.
    Simple(SimpleExpression),

    /// Source text split around prefixed identifiers.
    Compound(CompoundExpression),
}

/// An expression kept as a single source string.
#[derive(Debug, Clone, PartialEq)]
pub struct SimpleExpression {
    pub content: String,
    pub is_static: bool,
}

impl SimpleExpression {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            is_static: false,
        }
    }
}

/// A token stream: text segments with expression holes between them.
///
/// ``{ width: `${width}pxp` }`` compiles to
/// ``["{ width: `${", Simple("_ctx.width"), "}pxp` }"]``: the template
/// delimiters live inside the text segments, not in tokens of their own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundExpression {
    pub children: Vec<CompoundChild>,
}

impl CompoundExpression {
    pub fn new(children: Vec<CompoundChild>) -> Self {
        Self { children }
    }
}

/// One element of a [`CompoundExpression`].
#[derive(Debug, Clone, PartialEq)]
pub enum CompoundChild {
    /// Raw source text.
    Text(String),

    /// A single expression hole.
    Simple(SimpleExpression),

    /// A hole holding its own nested token stream.
    Compound(CompoundExpression),

    /// An opaque runtime helper reference. Never scanned.
    Symbol(String),
}

impl CompoundChild {
    pub fn text(value: impl Into<String>) -> Self {
        CompoundChild::Text(value.into())
    }

    pub fn hole(content: impl Into<String>) -> Self {
        CompoundChild::Simple(SimpleExpression::new(content))
    }
}

impl fmt::Display for ExpressionNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionNode::Simple(simple) => f.write_str(&simple.content),
            ExpressionNode::Compound(compound) => write!(f, "{compound}"),
        }
    }
}

impl fmt::Display for CompoundExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in &self.children {
            match child {
                CompoundChild::Text(text) | CompoundChild::Symbol(text) => f.write_str(text)?,
                CompoundChild::Simple(simple) => f.write_str(&simple.content)?,
                CompoundChild::Compound(inner) => write!(f, "{inner}")?,
            }
        }
        Ok(())
    }
}
