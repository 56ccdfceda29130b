//! pxp template transform
//!
//! A template-compiler node transform that rewrites `pxp` units inside
//! template literals of `:style` bindings, including when the compiler has
//! split the literal into text segments and expression holes.
//!
//! # Example
//!
//! ```
//! use pxp_template::rewrite_template_literals;
//! use pxp_value::PxpOptions;
//!
//! let options = PxpOptions::new("--viewport-width", "720").unwrap();
//! assert_eq!(
//!     rewrite_template_literals("{ width: `${width}pxp` }", &options),
//!     "{ width: `calc(${width}px * var(--viewport-width) / 720)` }",
//! );
//! ```

pub mod ast;
pub mod rewrite;
pub mod transform;

pub use ast::{
    CompoundChild, CompoundExpression, DirectiveNode, ElementNode, ExpressionNode, Prop,
    SimpleExpression, TemplateNode,
};
pub use rewrite::{rewrite_compound, rewrite_expression, rewrite_template_literals};
pub use transform::{create_pxp_compiler_plugin, traverse, NodeTransform, PxpCompilerPlugin};
