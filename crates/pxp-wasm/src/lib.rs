//! WASM bindings for the pxp transformer.
//!
//! Exposes the value transform, the template-literal rewrite and the runtime
//! style directive to JavaScript via wasm-bindgen. Every function takes an
//! `{ variableName, defaultValue }` options object and throws on invalid options.

use pxp_style::{Directive, InlineStyle, StylePxpDirective, StyleValue};
use pxp_value::PxpOptions;
use wasm_bindgen::prelude::*;

fn parse_options(options: JsValue) -> Result<PxpOptions, JsError> {
    serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))
}

/// Rewrite `pxp` units in a CSS value.
#[wasm_bindgen(js_name = transformPxp)]
pub fn transform_pxp(value: &str, options: JsValue) -> Result<String, JsError> {
    let options = parse_options(options)?;
    Ok(pxp_value::transform_pxp(value, &options))
}

/// Rewrite `${expr}pxp` inside template literals of an expression source string.
#[wasm_bindgen(js_name = rewriteExpression)]
pub fn rewrite_expression(source: &str, options: JsValue) -> Result<String, JsError> {
    let options = parse_options(options)?;
    Ok(pxp_template::rewrite_template_literals(source, &options))
}

/// Resolve a style object the way the `style-pxp` directive would.
///
/// Returns a new plain object with the same keys (minus `undefined`/`null`
/// entries) and every value as a string.
#[wasm_bindgen(js_name = applyStylePxp)]
pub fn apply_style_pxp(styles: JsValue, options: JsValue) -> Result<JsValue, JsError> {
    let options = parse_options(options)?;
    let binding = style_binding(&styles)?;

    let mut style = InlineStyle::new();
    StylePxpDirective::new(options).apply(&mut style, &binding);

    let js_obj = js_sys::Object::new();
    for (name, _) in &binding {
        if let Some(value) = style.get(name) {
            js_sys::Reflect::set(&js_obj, &name.into(), &value.into())
                .map_err(|_| JsError::new(&format!("Failed to set {name} property")))?;
        }
    }

    Ok(js_obj.into())
}

/// Get the transformer version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Read an object's own entries in insertion order.
fn style_binding(styles: &JsValue) -> Result<Vec<(String, Option<StyleValue>)>, JsError> {
    if !styles.is_object() {
        return Err(JsError::new("styles must be an object"));
    }

    let entries = js_sys::Object::entries(&js_sys::Object::from(styles.clone()));
    let mut binding = Vec::with_capacity(entries.length() as usize);

    for entry in entries.iter() {
        let pair = js_sys::Array::from(&entry);
        let Some(name) = pair.get(0).as_string() else {
            continue;
        };
        binding.push((name, style_value(pair.get(1))));
    }

    Ok(binding)
}

fn style_value(value: JsValue) -> Option<StyleValue> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    match serde_wasm_bindgen::from_value::<StyleValue>(value.clone()) {
        Ok(value) => Some(value),
        // Objects and arrays: whatever their `toString()` gives
        Err(_) => Some(StyleValue::Text(
            js_sys::Object::from(value).to_string().into(),
        )),
    }
}
