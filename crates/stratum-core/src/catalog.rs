//! The style catalog.
//!
//! A [`StyleCatalog`] maps a component-type identifier to the visual style the
//! diagram document uses for it. It is loaded once per invocation from a JSON
//! side file and only read afterwards; the engine receives it explicitly so
//! tests can substitute a fixture catalog built with
//! [`StyleCatalog::from_entries`].
//!
//! # Example
//!
//! ```
//! # use stratum_core::catalog::{StyleCatalog, StyleEntry};
//! let catalog = StyleCatalog::from_entries([
//!     StyleEntry::new("service", "Service", "rounded=1;whiteSpace=wrap;html=1;", 120.0, 60.0),
//! ]);
//!
//! assert!(catalog.get("service").is_some());
//! assert_eq!(catalog.list_component_types(None).len(), 1);
//! ```

use std::{fs, path::Path};

use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::Size;

/// Errors raised while loading a catalog file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read style catalog `{path}`: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse style catalog `{path}`: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

fn default_width() -> f32 {
    120.0
}

fn default_height() -> f32 {
    60.0
}

/// The default visual style of one component type.
///
/// The serialized field names follow the records written by the catalog
/// extraction tool (`value` for the default label, `style` for the style
/// string). Any extra fields in a record are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleEntry {
    id: String,
    #[serde(rename = "value", alias = "defaultLabel", default)]
    default_label: String,
    #[serde(alias = "styleString", default)]
    style: String,
    #[serde(rename = "width", alias = "defaultWidth", default = "default_width")]
    default_width: f32,
    #[serde(rename = "height", alias = "defaultHeight", default = "default_height")]
    default_height: f32,
}

impl StyleEntry {
    pub fn new(
        id: impl Into<String>,
        default_label: impl Into<String>,
        style: impl Into<String>,
        default_width: f32,
        default_height: f32,
    ) -> Self {
        Self {
            id: id.into(),
            default_label: default_label.into(),
            style: style.into(),
            default_width,
            default_height,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn default_label(&self) -> &str {
        &self.default_label
    }

    /// The draw.io style string, e.g. `shape=cylinder3;whiteSpace=wrap;`.
    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn default_width(&self) -> f32 {
        self.default_width
    }

    pub fn default_height(&self) -> f32 {
        self.default_height
    }

    /// Default size, truncated to whole units.
    pub fn default_size(&self) -> Size {
        Size::from_f32(self.default_width, self.default_height)
    }
}

/// The agent-facing view of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentType {
    pub id: String,
    pub default_label: String,
    pub style_string: String,
}

/// Immutable id → style lookup table.
#[derive(Debug, Clone, Default)]
pub struct StyleCatalog {
    entries: IndexMap<String, StyleEntry>,
}

impl StyleCatalog {
    /// Builds a catalog from entries. When two entries share an id the later
    /// one wins but keeps the position of the first.
    pub fn from_entries(entries: impl IntoIterator<Item = StyleEntry>) -> Self {
        let mut map = IndexMap::new();
        for entry in entries {
            map.insert(entry.id.clone(), entry);
        }
        Self { entries: map }
    }

    /// Loads a catalog from a JSON array of style records.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the file cannot be read or is not a JSON
    /// array of records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        info!(path = display; "Loading style catalog");

        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: display.clone(),
            source,
        })?;

        let catalog = Self::from_json(&content).map_err(|source| CatalogError::Parse {
            path: display.clone(),
            source,
        })?;

        debug!(path = display, entries = catalog.len(); "Style catalog loaded");
        Ok(catalog)
    }

    /// Parses a catalog from JSON text.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<StyleEntry> = serde_json::from_str(content)?;
        Ok(Self::from_entries(entries))
    }

    /// Looks up a component type.
    pub fn get(&self, id: &str) -> Option<&StyleEntry> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleEntry> {
        self.entries.values()
    }

    /// Lists the available component types in catalog order.
    ///
    /// `category` is accepted for callers that pass one, but catalog records
    /// carry no category yet, so it does not filter anything.
    pub fn list_component_types(&self, category: Option<&str>) -> Vec<ComponentType> {
        if let Some(category) = category {
            debug!(category; "Ignoring component category filter");
        }

        self.iter()
            .map(|entry| ComponentType {
                id: entry.id.clone(),
                default_label: entry.default_label.clone(),
                style_string: entry.style.clone(),
            })
            .collect()
    }
}
