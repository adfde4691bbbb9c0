//! Marker elements: what a highlight looks like in the tree and how to recognise one.
use html::Node;
use html::style::set_declaration;
use std::sync::Arc;

pub const MARKER_TAG: &str = "span";
/// Visual hook for stylesheets. Not used for detection.
pub const MARKER_CLASS: &str = "highlight";
/// Discriminator set on every marker at creation; the only thing `is_marker` checks.
pub const MARKER_ATTR: &str = "data-highlight";

/// Inline style the default preset expands to when a caller customises any property.
pub const DEFAULT_PRESET: &[(&str, &str)] = &[("background", "yellow"), ("color", "black")];

/// Caller-supplied style overrides, in the order given.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HighlightStyle {
    properties: Vec<(String, String)>,
}

impl HighlightStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: &str, value: impl ToString) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: &str, value: impl ToString) {
        set_declaration(&mut self.properties, property, &value.to_string());
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K: AsRef<str>, V: ToString> FromIterator<(K, V)> for HighlightStyle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = HighlightStyle::new();
        for (k, v) in iter {
            style.set(k.as_ref(), v);
        }
        style
    }
}

/// The resolved shape of every marker produced by one highlight call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkerTemplate {
    inline_style: Vec<(String, String)>,
}

impl MarkerTemplate {
    /// No custom style: the class alone carries the visual treatment. Otherwise the default
    /// preset is overlaid with the caller's properties.
    pub fn from_style(custom: Option<&HighlightStyle>) -> Self {
        let inline_style = match custom {
            Some(custom) if !custom.is_empty() => {
                let mut merged: Vec<(String, String)> = DEFAULT_PRESET
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                for (k, v) in custom.properties() {
                    set_declaration(&mut merged, k, v);
                }
                merged
            }
            _ => Vec::new(),
        };
        Self { inline_style }
    }

    pub fn inline_style(&self) -> &[(String, String)] {
        &self.inline_style
    }

    /// A fresh marker wrapping `text`.
    pub fn wrap(&self, text: &str) -> Node {
        Node::Element {
            id: html::Id::UNSET,
            name: Arc::from(MARKER_TAG),
            attributes: vec![
                (Arc::from("class"), Some(MARKER_CLASS.to_string())),
                (Arc::from(MARKER_ATTR), None),
            ],
            style: self.inline_style.clone(),
            children: vec![Node::text(text)],
        }
    }
}

impl Default for MarkerTemplate {
    fn default() -> Self {
        Self::from_style(None)
    }
}

pub fn is_marker(node: &Node) -> bool {
    matches!(node, Node::Element { .. }) && node.has_attr(MARKER_ATTR)
}
