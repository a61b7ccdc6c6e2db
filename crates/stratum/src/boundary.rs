//! System boundary detection and resizing.
//!
//! A boundary is a component whose style type is one of the configured
//! boundary style ids, or whose id contains the configured marker. It takes no
//! part in the tier grid; after layout it is stretched around the bounding box
//! of the internal tiers, with extra room on top for its title.

use log::{debug, info, warn};

use stratum_core::geometry::{Bounds, Point, Rect, Size, scaled};

use crate::{component::Component, component::PlacedComponent, config::BoundaryConfig};

/// Decides which components are boundaries.
#[derive(Debug, Clone)]
pub struct BoundaryRule {
    style_ids: Vec<String>,
    id_marker: String,
}

impl BoundaryRule {
    pub fn new(config: &BoundaryConfig) -> Self {
        Self {
            style_ids: config.style_ids().to_vec(),
            id_marker: config.id_marker().to_lowercase(),
        }
    }

    /// Returns true if `component` is a boundary.
    pub fn matches(&self, component: &Component) -> bool {
        self.style_ids
            .iter()
            .any(|id| id == component.style_type_id())
            || (!self.id_marker.is_empty()
                && component.id().to_lowercase().contains(&self.id_marker))
    }
}

/// Computes the frame that encloses `bounds`.
///
/// The frame extends `padding` beyond the box on every side, plus
/// `title_height` above it. Both are scaled by `multiplier`. Coordinates
/// saturate at the `i32` range.
pub fn enclosing_rect(bounds: Bounds, config: &BoundaryConfig, multiplier: f64) -> Rect {
    let padding = scaled(config.padding(), multiplier);
    let title = scaled(config.title_height(), multiplier);

    let both_sides = padding.saturating_mul(2);

    Rect::new(
        Point::new(
            bounds.min_x().saturating_sub(padding),
            bounds.min_y().saturating_sub(padding).saturating_sub(title),
        ),
        Size::new(
            bounds.width().saturating_add(both_sides),
            bounds
                .height()
                .saturating_add(both_sides)
                .saturating_add(title),
        ),
    )
}

/// Stretches every boundary to enclose `bounds`.
///
/// Boundaries keep their current geometry when `bounds` is `None`.
pub fn resize_boundaries(
    boundaries: Vec<PlacedComponent>,
    bounds: Option<Bounds>,
    config: &BoundaryConfig,
    multiplier: f64,
) -> Vec<PlacedComponent> {
    if boundaries.len() > 1 {
        warn!(count = boundaries.len(); "More than one boundary component, resizing all");
    }

    let Some(bounds) = bounds else {
        if !boundaries.is_empty() {
            debug!("No internal components to enclose, boundary keeps its geometry");
        }
        return boundaries;
    };

    let frame = enclosing_rect(bounds, config, multiplier);
    boundaries
        .into_iter()
        .map(|boundary| {
            info!(
                id = boundary.id(),
                x = frame.x(),
                y = frame.y(),
                width = frame.width(),
                height = frame.height();
                "Resized system boundary"
            );
            boundary.with_rect(frame)
        })
        .collect()
}
