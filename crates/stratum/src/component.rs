//! Components after catalog resolution and after placement.
//!
//! The pipeline only ever moves forward: a [`ComponentSpec`] is resolved once
//! against the catalog into a [`Component`], and each later stage turns its
//! input into new [`PlacedComponent`] values instead of mutating shared ones.

use log::warn;

use stratum_core::{
    catalog::StyleCatalog,
    geometry::{Point, Rect, Size},
    spec::ComponentSpec,
    tier::Tier,
};

/// A component whose style type resolved in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    order: usize,
    id: String,
    style_type_id: String,
    label: String,
    style: String,
    size: Size,
    requested: Option<Point>,
    pinned: bool,
}

impl Component {
    /// Resolves `spec` against `catalog`.
    ///
    /// Returns `None` when the style type is unknown. The label falls back to
    /// the catalog's default label. Width and height each fall back to the
    /// catalog's default on their own.
    pub fn resolve(order: usize, spec: &ComponentSpec, catalog: &StyleCatalog) -> Option<Self> {
        let Some(entry) = catalog.get(spec.style_type_id()) else {
            warn!(
                id = spec.id(),
                style_type_id = spec.style_type_id();
                "Dropping component with unknown style type"
            );
            return None;
        };

        let default_size = entry.default_size();
        let size = Size::new(
            spec.width().map_or(default_size.width(), |width| width as i32),
            spec.height().map_or(default_size.height(), |height| height as i32),
        );
        let requested = match (spec.x(), spec.y()) {
            (None, None) => None,
            (x, y) => Some(Point::new(
                x.unwrap_or_default() as i32,
                y.unwrap_or_default() as i32,
            )),
        };

        Some(Self {
            order,
            id: spec.id().to_string(),
            style_type_id: spec.style_type_id().to_string(),
            label: spec
                .label()
                .unwrap_or_else(|| entry.default_label())
                .to_string(),
            style: entry.style().to_string(),
            size,
            requested,
            pinned: spec.is_pinned(),
        })
    }

    /// Position of the component in the original request.
    pub fn order(&self) -> usize {
        self.order
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn style_type_id(&self) -> &str {
        &self.style_type_id
    }

    /// The explicit label, or the catalog default.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The catalog style string.
    pub fn style(&self) -> &str {
        &self.style
    }

    /// Requested size, or the catalog default.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Position given in the request, if any.
    pub fn requested_position(&self) -> Option<Point> {
        self.requested
    }

    /// Whether the component opted out of automatic layout.
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// The geometry the request asked for, with unset coordinates at zero.
    pub fn requested_rect(&self) -> Rect {
        Rect::new(self.requested.unwrap_or_default(), self.size)
    }
}

/// A component with final geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedComponent {
    component: Component,
    tier: Option<Tier>,
    rect: Rect,
}

impl PlacedComponent {
    /// Places a component that was laid out in a tier row.
    pub fn tiered(component: Component, tier: Tier, rect: Rect) -> Self {
        Self {
            component,
            tier: Some(tier),
            rect,
        }
    }

    /// Places a component outside the tier grid at its requested geometry.
    pub fn untiered(component: Component) -> Self {
        let rect = component.requested_rect();
        Self {
            component,
            tier: None,
            rect,
        }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn id(&self) -> &str {
        self.component.id()
    }

    /// The tier row this component was placed in. Boundaries and pinned
    /// components have none.
    pub fn tier(&self) -> Option<Tier> {
        self.tier
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns a copy with new geometry.
    pub fn with_rect(mut self, rect: Rect) -> Self {
        self.rect = rect;
        self
    }
}
