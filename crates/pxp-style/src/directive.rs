//! The `style-pxp` directive and the registry hosts install it into.

use crate::target::StyleTarget;
use crate::{StyleBinding, StyleValue};
use pxp_value::{transform_pxp, PxpOptions, PXP_UNIT};
use std::collections::HashMap;

/// Name the directive is registered under.
pub const STYLE_PXP_DIRECTIVE: &str = "style-pxp";

/// A custom behavior invoked per element with its bound value.
pub trait Directive {
    fn apply(&self, target: &mut dyn StyleTarget, binding: &StyleBinding);
}

/// Directive registration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("directive '{0}' is already registered")]
    Duplicate(String),
}

/// Named directives available to templates.
#[derive(Default)]
pub struct DirectiveRegistry {
    directives: HashMap<String, Box<dyn Directive>>,
}

impl DirectiveRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        name: &str,
        directive: Box<dyn Directive>,
    ) -> Result<(), RegistryError> {
        if self.directives.contains_key(name) {
            return Err(RegistryError::Duplicate(name.to_string()));
        }
        self.directives.insert(name.to_string(), directive);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&dyn Directive> {
        self.directives.get(name).map(|d| &**d)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.directives.contains_key(name)
    }
}

/// Something that adds directives to a registry.
pub trait Plugin {
    fn install(&self, registry: &mut DirectiveRegistry) -> Result<(), RegistryError>;
}

/// Applies declarations, rewriting `pxp` values into scale expressions.
#[derive(Debug, Clone)]
pub struct StylePxpDirective {
    options: PxpOptions,
}

impl StylePxpDirective {
    pub fn new(options: PxpOptions) -> Self {
        Self { options }
    }

    /// The value that gets written for one declaration.
    pub fn resolve(&self, value: &StyleValue) -> String {
        match value {
            StyleValue::Text(text) if text.contains(PXP_UNIT) => {
                transform_pxp(text, &self.options)
            }
            other => other.to_string(),
        }
    }
}

impl Directive for StylePxpDirective {
    fn apply(&self, target: &mut dyn StyleTarget, binding: &StyleBinding) {
        for (name, value) in binding {
            let Some(value) = value else {
                continue;
            };
            let resolved = self.resolve(value);
            tracing::trace!(property = %name, value = %resolved, "set style property");
            target.set_property(name, &resolved);
        }
    }
}

/// Registers [`StylePxpDirective`] as `style-pxp`.
#[derive(Debug, Clone)]
pub struct PxpPlugin {
    options: PxpOptions,
}

pub fn create_pxp_plugin(options: PxpOptions) -> PxpPlugin {
    PxpPlugin { options }
}

impl Plugin for PxpPlugin {
    fn install(&self, registry: &mut DirectiveRegistry) -> Result<(), RegistryError> {
        registry.register(
            STYLE_PXP_DIRECTIVE,
            Box::new(StylePxpDirective::new(self.options.clone())),
        )
    }
}
