//! Strict component and edge requests.
//!
//! Callers hand the engine loosely typed [`Payload`] entries. The parser crate
//! resolves them once into [`ComponentSpec`] and [`EdgeSpec`] values, and every
//! later stage works on the strict form only.

use serde::{Deserialize, Serialize};

/// A single request entry as received from a loosely typed caller.
///
/// Either an already structured value or a string that still has to be
/// decoded (JSON or a Python-style literal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Payload {
    Raw(String),
    Structured(serde_json::Value),
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Payload::Raw(text),
            other => Payload::Structured(other),
        }
    }
}

impl From<&str> for Payload {
    fn from(text: &str) -> Self {
        Payload::Raw(text.to_string())
    }
}

impl From<String> for Payload {
    fn from(text: String) -> Self {
        Payload::Raw(text)
    }
}

/// A requested diagram node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSpec {
    id: String,
    style_type_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<f64>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pinned: bool,
}

impl ComponentSpec {
    /// Creates a component request with no label override and no geometry.
    pub fn new(id: impl Into<String>, style_type_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            style_type_id: style_type_id.into(),
            label: None,
            x: None,
            y: None,
            width: None,
            height: None,
            pinned: false,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn with_size(self, width: f64, height: f64) -> Self {
        self.with_width(width).with_height(height)
    }

    /// Overrides the catalog width only.
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self
    }

    /// Overrides the catalog height only.
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    /// Opts this component out of automatic layout.
    pub fn pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn style_type_id(&self) -> &str {
        &self.style_type_id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn x(&self) -> Option<f64> {
        self.x
    }

    pub fn y(&self) -> Option<f64> {
        self.y
    }

    pub fn width(&self) -> Option<f64> {
        self.width
    }

    pub fn height(&self) -> Option<f64> {
        self.height
    }

    pub fn is_pinned(&self) -> bool {
        self.pinned
    }
}

/// A requested directed connection between two components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeSpec {
    source_id: String,
    target_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl EdgeSpec {
    pub fn new(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            target_id: target_id.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}
