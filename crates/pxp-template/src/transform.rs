//! Node transforms run over a compiled template.

use crate::ast::{Prop, TemplateNode};
use crate::rewrite::rewrite_expression;
use pxp_value::PxpOptions;

/// Raw directive names treated as the style binding.
pub const STYLE_BINDINGS: &[&str] = &[":style", "v-bind:style"];

/// A per-node hook, called once for every node of the template.
pub trait NodeTransform {
    fn transform(&self, node: &mut TemplateNode);
}

impl<F> NodeTransform for F
where
    F: Fn(&mut TemplateNode),
{
    fn transform(&self, node: &mut TemplateNode) {
        self(node)
    }
}

/// Apply `transforms` to `node` and all of its descendants, parents first.
pub fn traverse(node: &mut TemplateNode, transforms: &[&dyn NodeTransform]) {
    for transform in transforms {
        transform.transform(node);
    }

    let children = match node {
        TemplateNode::Root(children) => children,
        TemplateNode::Element(el) => &mut el.children,
        TemplateNode::Text(_) | TemplateNode::Comment(_) => return,
    };

    for child in children {
        traverse(child, transforms);
    }
}

/// Rewrites `pxp` units inside `:style` bindings.
#[derive(Debug, Clone)]
pub struct PxpCompilerPlugin {
    options: PxpOptions,
}

impl PxpCompilerPlugin {
    pub fn new(options: PxpOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PxpOptions {
        &self.options
    }
}

/// Build the node transform to register with the template compiler.
pub fn create_pxp_compiler_plugin(options: PxpOptions) -> PxpCompilerPlugin {
    PxpCompilerPlugin::new(options)
}

impl NodeTransform for PxpCompilerPlugin {
    fn transform(&self, node: &mut TemplateNode) {
        let TemplateNode::Element(el) = node else {
            return;
        };

        for prop in &mut el.props {
            let Prop::Directive(directive) = prop else {
                continue;
            };
            if !STYLE_BINDINGS.contains(&directive.raw_name.as_str()) {
                continue;
            }
            if let Some(exp) = directive.exp.as_mut() {
                tracing::debug!(tag = %el.tag, "rewriting style binding");
                rewrite_expression(exp, &self.options);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{
        AttributeNode, CompoundChild, CompoundExpression, DirectiveNode, ElementNode,
        ExpressionNode, SimpleExpression,
    };
    use pretty_assertions::assert_eq;
    use std::cell::Cell;

    fn plugin() -> PxpCompilerPlugin {
        create_pxp_compiler_plugin(PxpOptions::new("--viewport-width", "720").unwrap())
    }

    fn style_binding(children: Vec<CompoundChild>) -> Prop {
        Prop::Directive(DirectiveNode::bind(
            "style",
            ExpressionNode::Compound(CompoundExpression::new(children)),
        ))
    }

    fn div(props: Vec<Prop>) -> TemplateNode {
        TemplateNode::Element(ElementNode::new("div", props))
    }

    fn directive_exp(node: &TemplateNode, index: usize) -> String {
        let TemplateNode::Element(el) = node else {
            panic!("expected element");
        };
        let Prop::Directive(directive) = &el.props[index] else {
            panic!("expected directive");
        };
        directive
            .exp
            .as_ref()
            .map(|exp| exp.to_string())
            .unwrap_or_default()
    }

    // =========================================================================
    // Style bindings
    // =========================================================================

    #[test]
    fn test_rewrites_style_binding() {
        let mut node = div(vec![style_binding(vec![
            CompoundChild::text("{ width: `${"),
            CompoundChild::hole("_ctx.width"),
            CompoundChild::text("}pxp` }"),
        ])]);

        plugin().transform(&mut node);

        assert_eq!(
            directive_exp(&node, 0),
            "{ width: `calc(${_ctx.width}px * var(--viewport-width) / 720)` }"
        );
    }

    #[test]
    fn test_rewrites_long_form_binding() {
        let mut node = div(vec![Prop::Directive(DirectiveNode {
            name: "bind".into(),
            raw_name: "v-bind:style".into(),
            arg: None,
            exp: Some(ExpressionNode::Simple(SimpleExpression::new(
                "{ top: `${y}pxp` }",
            ))),
            modifiers: Vec::new(),
        })]);

        plugin().transform(&mut node);

        assert_eq!(
            directive_exp(&node, 0),
            "{ top: `calc(${y}px * var(--viewport-width) / 720)` }"
        );
    }

    #[test]
    fn test_other_directives_untouched() {
        let source = "`${w}pxp`";
        let mut node = div(vec![Prop::Directive(DirectiveNode::bind(
            "title",
            ExpressionNode::Simple(SimpleExpression::new(source)),
        ))]);

        plugin().transform(&mut node);

        assert_eq!(directive_exp(&node, 0), source);
    }

    #[test]
    fn test_static_style_attribute_untouched() {
        let attr = Prop::Attribute(AttributeNode {
            name: "style".into(),
            value: Some("width: 10pxp".into()),
        });
        let mut node = div(vec![attr.clone()]);

        plugin().transform(&mut node);

        assert_eq!(node, div(vec![attr]));
    }

    #[test]
    fn test_binding_without_expression() {
        let mut node = div(vec![Prop::Directive(DirectiveNode {
            name: "bind".into(),
            raw_name: ":style".into(),
            arg: None,
            exp: None,
            modifiers: Vec::new(),
        })]);
        let before = node.clone();

        plugin().transform(&mut node);

        assert_eq!(node, before);
    }

    #[test]
    fn test_non_element_nodes_ignored() {
        let mut text = TemplateNode::Text("`${w}pxp`".into());
        plugin().transform(&mut text);
        assert_eq!(text, TemplateNode::Text("`${w}pxp`".into()));
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    #[test]
    fn test_traverse_reaches_nested_elements() {
        let inner = div(vec![style_binding(vec![
            CompoundChild::text("{ left: `${"),
            CompoundChild::hole("_ctx.x"),
            CompoundChild::text("}pxp` }"),
        ])]);
        let mut outer = ElementNode::new("section", Vec::new());
        outer.children.push(inner);
        let mut root = TemplateNode::Root(vec![TemplateNode::Element(outer)]);

        let plugin = plugin();
        traverse(&mut root, &[&plugin]);

        let TemplateNode::Root(children) = &root else {
            panic!("expected root");
        };
        let TemplateNode::Element(section) = &children[0] else {
            panic!("expected element");
        };
        assert_eq!(
            directive_exp(&section.children[0], 0),
            "{ left: `calc(${_ctx.x}px * var(--viewport-width) / 720)` }"
        );
    }

    #[test]
    fn test_traverse_visits_every_node() {
        let count = Cell::new(0);
        let counter = |_: &mut TemplateNode| count.set(count.get() + 1);

        let mut el = ElementNode::new("p", Vec::new());
        el.children.push(TemplateNode::Text("hi".into()));
        el.children.push(TemplateNode::Comment("note".into()));
        let mut root = TemplateNode::Root(vec![TemplateNode::Element(el)]);

        traverse(&mut root, &[&counter]);

        assert_eq!(count.get(), 4);
    }
}
