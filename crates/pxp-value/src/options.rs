use serde::Deserialize;

/// The unit suffix this crate rewrites.
pub const PXP_UNIT: &str = "pxp";

/// Rewrite settings shared by every pxp transform.
///
/// `variable_name` is the CSS custom property holding the live viewport
/// dimension (`--viewport-width`) and `default_value` is the reference
/// dimension the design was drawn at (`1920`). Both are required.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawOptions")]
pub struct PxpOptions {
    variable_name: String,
    default_value: String,
}

/// Invalid rewrite settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("variable name must not be empty")]
    EmptyVariableName,
    #[error("default value must not be empty")]
    EmptyDefaultValue,
}

impl PxpOptions {
    pub fn new(
        variable_name: impl Into<String>,
        default_value: impl Into<String>,
    ) -> Result<Self, OptionsError> {
        let variable_name = variable_name.into();
        let default_value = default_value.into();

        if variable_name.trim().is_empty() {
            return Err(OptionsError::EmptyVariableName);
        }
        if default_value.trim().is_empty() {
            return Err(OptionsError::EmptyDefaultValue);
        }

        Ok(Self {
            variable_name,
            default_value,
        })
    }

    pub fn variable_name(&self) -> &str {
        &self.variable_name
    }

    pub fn default_value(&self) -> &str {
        &self.default_value
    }

    /// Text that follows the value inside the scale expression:
    /// `px * var(--viewport-width) / 1920)`.
    pub fn scale_suffix(&self) -> String {
        format!(
            "px * var({}) / {})",
            self.variable_name, self.default_value
        )
    }

    /// The full scale expression for a value: `calc(2px * var(--viewport-width) / 1920)`.
    pub fn scale_expression(&self, value: &str) -> String {
        format!("calc({value}{})", self.scale_suffix())
    }
}

/// Wire shape of [`PxpOptions`] as JS hosts pass it.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    variable_name: String,
    default_value: String,
}

impl TryFrom<RawOptions> for PxpOptions {
    type Error = OptionsError;

    fn try_from(raw: RawOptions) -> Result<Self, Self::Error> {
        PxpOptions::new(raw.variable_name, raw.default_value)
    }
}
