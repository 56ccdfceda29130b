use std::fmt;

/// Anything styles can be written to: a DOM element's style object, a
/// renderer's node, or an [`InlineStyle`] buffer.
pub trait StyleTarget {
    fn set_property(&mut self, name: &str, value: &str);
}

/// An ordered inline style declaration block.
///
/// Setting a property that is already present replaces its value in place.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineStyle {
    declarations: Vec<(String, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Render as the text of a `style="..."` attribute.
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|(name, value)| format!("{name}: {value}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl StyleTarget for InlineStyle {
    fn set_property(&mut self, name: &str, value: &str) {
        match self.declarations.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self
                .declarations
                .push((name.to_string(), value.to_string())),
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.css_text())
    }
}
