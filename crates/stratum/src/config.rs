//! Configuration types for Stratum diagram generation.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out and where artifacts are written. All types implement
//! [`serde::Deserialize`] with every field defaulted, so a configuration file
//! only needs to name the values it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`LayoutConfig`] - Grid constants for the tier layout.
//! - [`BoundaryConfig`] - How the system boundary is found and padded.
//! - [`OutputConfig`] - Artifact directory and file naming.
//!
//! # Example
//!
//! ```
//! # use stratum::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().row_height(), 250);
//! assert_eq!(config.output().directory().to_str(), Some("architectures"));
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Boundary configuration section.
    #[serde(default)]
    boundary: BoundaryConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(layout: LayoutConfig, boundary: BoundaryConfig, output: OutputConfig) -> Self {
        Self {
            layout,
            boundary,
            output,
        }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the boundary configuration.
    pub fn boundary(&self) -> &BoundaryConfig {
        &self.boundary
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Returns a copy with the artifact directory replaced.
    pub fn with_output_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.directory = directory.into();
        self
    }
}

/// Grid constants for the tier layout.
///
/// Every value except `database_size` is given before scaling and is
/// multiplied by the request's scale multiplier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    start_y: i32,
    row_height: i32,
    column_width: i32,
    page_width: i32,
    min_margin: i32,
    database_size: i32,
    fallback_width: i32,
    fallback_height: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start_y: 100,
            row_height: 250,
            column_width: 350,
            page_width: 1600,
            min_margin: 50,
            database_size: 80,
            fallback_width: 120,
            fallback_height: 60,
        }
    }
}

impl LayoutConfig {
    /// Y coordinate of the first non-empty row.
    pub fn start_y(&self) -> i32 {
        self.start_y
    }

    /// Vertical distance between consecutive non-empty rows.
    pub fn row_height(&self) -> i32 {
        self.row_height
    }

    /// Horizontal distance between components in one row.
    pub fn column_width(&self) -> i32 {
        self.column_width
    }

    /// Width of the page each row is centered in.
    pub fn page_width(&self) -> i32 {
        self.page_width
    }

    /// Smallest left margin a centered row may start at.
    pub fn min_margin(&self) -> i32 {
        self.min_margin
    }

    /// Side of the square footprint every database-tier component gets.
    pub fn database_size(&self) -> i32 {
        self.database_size
    }

    pub fn fallback_width(&self) -> i32 {
        self.fallback_width
    }

    pub fn fallback_height(&self) -> i32 {
        self.fallback_height
    }

    pub fn with_row_height(mut self, row_height: i32) -> Self {
        self.row_height = row_height;
        self
    }

    pub fn with_column_width(mut self, column_width: i32) -> Self {
        self.column_width = column_width;
        self
    }

    pub fn with_page_width(mut self, page_width: i32) -> Self {
        self.page_width = page_width;
        self
    }
}

/// How the system boundary is identified and padded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    padding: i32,
    title_height: i32,
    style_ids: Vec<String>,
    id_marker: String,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            padding: 60,
            title_height: 40,
            style_ids: vec![
                "system_boundary".to_string(),
                "MUqYMd9_9H_2uWHAdu_l-4".to_string(),
            ],
            id_marker: "boundary".to_string(),
        }
    }
}

impl BoundaryConfig {
    /// Space left around the enclosed components, before scaling.
    pub fn padding(&self) -> i32 {
        self.padding
    }

    /// Extra space above the top padding for the boundary's title.
    pub fn title_height(&self) -> i32 {
        self.title_height
    }

    /// Catalog style-type ids that denote a boundary.
    pub fn style_ids(&self) -> &[String] {
        &self.style_ids
    }

    /// Component id substring that denotes a boundary (matched case-insensitively).
    pub fn id_marker(&self) -> &str {
        &self.id_marker
    }
}

/// Where artifacts are written and how they are named.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    directory: PathBuf,
    extension: String,
    sidecar_directory: String,
    sidecar_extension: String,
    fallback_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("architectures"),
            extension: "drawio".to_string(),
            sidecar_directory: "prompts".to_string(),
            sidecar_extension: "md".to_string(),
            fallback_prefix: "system_architecture".to_string(),
        }
    }
}

impl OutputConfig {
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Document file extension, without the dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Sub-directory of [`Self::directory`] that holds provenance sidecars.
    pub fn sidecar_directory(&self) -> &str {
        &self.sidecar_directory
    }

    pub fn sidecar_extension(&self) -> &str {
        &self.sidecar_extension
    }

    /// Name used when a prefix sanitizes to nothing.
    pub fn fallback_prefix(&self) -> &str {
        &self.fallback_prefix
    }
}
