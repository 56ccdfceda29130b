//! pxp runtime styles
//!
//! Applies CSS declarations to an element at runtime, rewriting any `pxp`
//! value on the way through. Hosts expose it as the `style-pxp` directive.
//!
//! ```text
//! { width: "10pxp", opacity: 0.5 } → StylePxpDirective → StyleTarget::set_property
//! ```

pub mod directive;
pub mod target;

pub use directive::{
    create_pxp_plugin, Directive, DirectiveRegistry, Plugin, PxpPlugin, RegistryError,
    StylePxpDirective, STYLE_PXP_DIRECTIVE,
};
pub use target::{InlineStyle, StyleTarget};

use serde::Deserialize;
use std::fmt;

/// A style value as the host hands it over.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
    Text(String),
    Number(f64),
    Bool(bool),
}

/// Property/value pairs bound to a directive. `None` values are skipped.
pub type StyleBinding = [(String, Option<StyleValue>)];

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(text) => f.write_str(text),
            StyleValue::Number(n) => f.write_str(&format_number(*n)),
            StyleValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Text(value.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Text(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Number(value)
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Number(value.into())
    }
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        StyleValue::Bool(value)
    }
}

/// Largest magnitude below which every integral `f64` fits an `i64` exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Format a number the way JS `toString` would for common cases.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
