//! Tier-ordered grid layout.
//!
//! Each non-empty tier occupies one row. Rows are stacked top to bottom in
//! [`Tier`] order, `row_height` apart, and the components of a row are spaced
//! `column_width` apart with the row centered on the page, but never closer
//! to the left edge than `min_margin`. All constants except the database
//! footprint and that margin are scaled by the request multiplier, and every
//! coordinate is truncated toward zero.
//!
//! The layout also reports the bounding box of every component in an
//! internal tier (all tiers but [`Tier::User`]), which the boundary resizer
//! uses to frame the system.

use std::collections::BTreeMap;

use log::{debug, warn};

use stratum_core::{
    geometry::{Bounds, Point, Rect, Size, scaled},
    tier::Tier,
};

use crate::{
    component::{Component, PlacedComponent},
    config::LayoutConfig,
};

/// Returns `multiplier` if it can scale a layout, `1.0` otherwise.
pub fn effective_multiplier(multiplier: f64) -> f64 {
    if multiplier.is_finite() && multiplier > 0.0 {
        multiplier
    } else {
        warn!(multiplier; "Invalid layout multiplier, using 1.0");
        1.0
    }
}

/// The result of laying out the tier grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    placed: Vec<PlacedComponent>,
    bounds: Option<Bounds>,
}

impl Layout {
    /// Placed components, row by row in tier order.
    pub fn placed(&self) -> &[PlacedComponent] {
        &self.placed
    }

    /// Bounding box of the internal tiers, or `None` when they are all empty.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    pub fn into_parts(self) -> (Vec<PlacedComponent>, Option<Bounds>) {
        (self.placed, self.bounds)
    }
}

/// The scaled grid constants for one request.
#[derive(Debug, Clone, Copy)]
struct Grid {
    start_y: i32,
    row_height: i32,
    column_width: i32,
    page_width: i32,
    min_margin: i32,
    database_size: Size,
    fallback: Size,
}

impl Grid {
    fn new(config: &LayoutConfig, multiplier: f64) -> Self {
        Self {
            start_y: scaled(config.start_y(), multiplier),
            row_height: scaled(config.row_height(), multiplier),
            column_width: scaled(config.column_width(), multiplier),
            page_width: scaled(config.page_width(), multiplier),
            min_margin: config.min_margin(),
            database_size: Size::square(config.database_size()),
            fallback: Size::new(
                scaled(config.fallback_width(), multiplier),
                scaled(config.fallback_height(), multiplier),
            ),
        }
    }

    /// Left edge of a centered row of `count` components.
    fn row_start(&self, count: usize) -> i32 {
        let count = i32::try_from(count).unwrap_or(i32::MAX);
        let row_width = count.saturating_mul(self.column_width);
        let start = self.page_width.saturating_sub(row_width) / 2;
        start.max(self.min_margin)
    }

    fn size_for(&self, tier: Tier, component: &Component) -> Size {
        if tier == Tier::Database {
            return self.database_size;
        }
        let size = component.size();
        if size.width() <= 0 || size.height() <= 0 {
            self.fallback
        } else {
            size
        }
    }
}

/// Lays out tiered components.
///
/// `multiplier` must be positive and finite; see [`effective_multiplier`].
pub fn layout(
    tiers: &BTreeMap<Tier, Vec<Component>>,
    multiplier: f64,
    config: &LayoutConfig,
) -> Layout {
    let grid = Grid::new(config, multiplier);
    debug!(grid:?; "Laying out tier grid");

    let mut placed = Vec::new();
    let mut bounds: Option<Bounds> = None;
    let mut current_y = grid.start_y;

    for tier in Tier::ALL {
        let Some(components) = tiers.get(&tier).filter(|c| !c.is_empty()) else {
            continue;
        };

        let start_x = grid.row_start(components.len());
        let mut x = start_x;
        for component in components {
            let rect = Rect::new(Point::new(x, current_y), grid.size_for(tier, component));
            if tier.is_internal() {
                bounds = Some(match bounds {
                    Some(b) => b.merge(&rect.bounds()),
                    None => rect.bounds(),
                });
            }
            placed.push(PlacedComponent::tiered(component.clone(), tier, rect));
            x = x.saturating_add(grid.column_width);
        }

        debug!(
            tier:% = tier,
            y = current_y,
            start_x,
            count = components.len();
            "Placed tier row"
        );
        current_y = current_y.saturating_add(grid.row_height);
    }

    Layout { placed, bounds }
}

#[cfg(test)]
mod tests {
    use stratum_core::{
        catalog::{StyleCatalog, StyleEntry},
        spec::ComponentSpec,
    };

    use super::*;
    use crate::classify::classify;

    fn catalog() -> StyleCatalog {
        StyleCatalog::from_entries([
            StyleEntry::new("service", "", "rounded=1;", 120.0, 60.0),
            StyleEntry::new("actor", "", "shape=umlActor;", 30.0, 60.0),
            StyleEntry::new("cylinder", "", "shape=cylinder3;", 60.0, 100.0),
            StyleEntry::new("flat", "", "text;", 0.0, 0.0),
        ])
    }

    fn components(specs: &[(&str, &str, &str)]) -> Vec<Component> {
        let catalog = catalog();
        specs
            .iter()
            .enumerate()
            .map(|(i, (id, style, label))| {
                let spec = ComponentSpec::new(*id, *style).with_label(*label);
                Component::resolve(i, &spec, &catalog).unwrap()
            })
            .collect()
    }

    fn rect_of(layout: &Layout, id: &str) -> Rect {
        layout
            .placed()
            .iter()
            .find(|p| p.id() == id)
            .map(PlacedComponent::rect)
            .unwrap()
    }

    #[test]
    fn test_two_rows() {
        let tiers = classify(components(&[
            ("u1", "actor", "User"),
            ("s1", "service", "api-orders"),
        ]));
        let layout = layout(&tiers, 1.0, &LayoutConfig::default());

        // One component per row: (1600 - 350) / 2 = 625
        assert_eq!(rect_of(&layout, "u1"), Rect::new(Point::new(625, 100), Size::new(30, 60)));
        assert_eq!(rect_of(&layout, "s1"), Rect::new(Point::new(625, 350), Size::new(120, 60)));
        assert_eq!(layout.bounds(), Some(Bounds::new(625, 350, 745, 410)));
    }

    #[test]
    fn test_row_is_centered_and_evenly_spaced() {
        let tiers = classify(components(&[
            ("a", "service", "a"),
            ("b", "service", "b"),
            ("c", "service", "c"),
        ]));
        let layout = layout(&tiers, 1.0, &LayoutConfig::default());

        // (1600 - 1050) / 2 = 275
        assert_eq!(rect_of(&layout, "a").x(), 275);
        assert_eq!(rect_of(&layout, "b").x(), 625);
        assert_eq!(rect_of(&layout, "c").x(), 975);
        assert_eq!(rect_of(&layout, "a").y(), 100);
    }

    fn services(count: usize) -> Vec<Component> {
        let specs: Vec<_> = (0..count)
            .map(|i| (format!("s{i}"), format!("svc{i}")))
            .collect();
        let specs: Vec<_> = specs
            .iter()
            .map(|(id, label)| (id.as_str(), "service", label.as_str()))
            .collect();
        components(&specs)
    }

    #[test]
    fn test_wide_row_is_clamped_to_margin() {
        let layout = layout(&classify(services(6)), 1.0, &LayoutConfig::default());

        assert_eq!(rect_of(&layout, "s0").x(), 50);
        assert_eq!(rect_of(&layout, "s5").x(), 50 + 5 * 350);
    }

    #[test]
    fn test_margin_is_not_scaled() {
        let layout = layout(&classify(services(6)), 2.0, &LayoutConfig::default());

        // (3200 - 6 * 700) / 2 is negative, so the row starts at the margin
        assert_eq!(rect_of(&layout, "s0").x(), 50);
        assert_eq!(rect_of(&layout, "s5").x(), 50 + 5 * 700);
    }

    #[test]
    fn test_empty_tiers_do_not_advance_rows() {
        let tiers = classify(components(&[
            ("s1", "service", "orders"),
            ("d1", "cylinder", "Orders DB"),
        ]));
        let layout = layout(&tiers, 1.0, &LayoutConfig::default());

        assert_eq!(rect_of(&layout, "s1").y(), 100);
        assert_eq!(rect_of(&layout, "d1").y(), 350);
    }

    #[test]
    fn test_database_footprint_is_fixed() {
        let tiers = classify(components(&[("d1", "cylinder", "Orders DB")]));
        let layout = layout(&tiers, 2.0, &LayoutConfig::default());

        assert_eq!(rect_of(&layout, "d1").size(), Size::new(80, 80));
    }

    #[test]
    fn test_multiplier_scales_grid() {
        let tiers = classify(components(&[
            ("u1", "actor", "User"),
            ("s1", "service", "orders"),
        ]));
        let layout = layout(&tiers, 1.5, &LayoutConfig::default());

        // start_y 150, row 375, page 2400, column 525: (2400 - 525) / 2 = 937
        assert_eq!(rect_of(&layout, "u1").origin(), Point::new(937, 150));
        assert_eq!(rect_of(&layout, "s1").origin(), Point::new(937, 525));
    }

    #[test]
    fn test_user_tier_excluded_from_bounds() {
        let tiers = classify(components(&[("u1", "actor", "User")]));
        let layout = layout(&tiers, 1.0, &LayoutConfig::default());

        assert_eq!(layout.placed().len(), 1);
        assert_eq!(layout.bounds(), None);
    }

    #[test]
    fn test_degenerate_size_uses_fallback() {
        let tiers = classify(components(&[("t", "flat", "title")]));
        let layout = layout(&tiers, 1.0, &LayoutConfig::default());

        assert_eq!(rect_of(&layout, "t").size(), Size::new(120, 60));
    }

    #[test]
    fn test_effective_multiplier() {
        assert_eq!(effective_multiplier(1.5), 1.5);
        assert_eq!(effective_multiplier(0.0), 1.0);
        assert_eq!(effective_multiplier(-2.0), 1.0);
        assert_eq!(effective_multiplier(f64::NAN), 1.0);
        assert_eq!(effective_multiplier(f64::INFINITY), 1.0);
    }
}
