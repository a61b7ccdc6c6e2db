//! Connector side selection.
//!
//! An edge leaves its source through one side and enters its target through
//! the opposite one. The pair is picked from the offset between the two
//! components' origins: the dominant axis wins, and a tie is routed
//! horizontally.

use std::{collections::HashMap, fmt};

use log::{trace, warn};

use stratum_core::{geometry::Point, spec::EdgeSpec};

use crate::component::PlacedComponent;

/// One side of a component's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Relative anchor of the side's midpoint, as `(x, y)` fractions of the box.
    pub fn anchor(self) -> (&'static str, &'static str) {
        match self {
            Side::Top => ("0.5", "0"),
            Side::Bottom => ("0.5", "1"),
            Side::Left => ("0", "0.5"),
            Side::Right => ("1", "0.5"),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Side::Top => "top",
            Side::Bottom => "bottom",
            Side::Left => "left",
            Side::Right => "right",
        };
        f.write_str(name)
    }
}

/// The exit side on the source and the entry side on the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttachmentRule {
    exit: Side,
    entry: Side,
}

impl AttachmentRule {
    /// Downward: leave through the bottom, enter through the top.
    pub const DOWN: Self = Self::new(Side::Bottom, Side::Top);
    /// Upward: leave through the top, enter through the bottom.
    pub const UP: Self = Self::new(Side::Top, Side::Bottom);
    /// Rightward: leave through the right, enter through the left.
    pub const RIGHT: Self = Self::new(Side::Right, Side::Left);
    /// Leftward: leave through the left, enter through the right.
    pub const LEFT: Self = Self::new(Side::Left, Side::Right);

    /// Rule used when an endpoint has no placement.
    pub const FALLBACK: Self = Self::RIGHT;

    pub const fn new(exit: Side, entry: Side) -> Self {
        Self { exit, entry }
    }

    pub fn exit(self) -> Side {
        self.exit
    }

    pub fn entry(self) -> Side {
        self.entry
    }

    /// Returns true if the connector leaves through the top or bottom.
    pub fn is_vertical(self) -> bool {
        matches!(self.exit, Side::Top | Side::Bottom)
    }

    /// The draw.io style fragment pinning both ends,
    /// e.g. `exitX=0.5;exitY=1;entryX=0.5;entryY=0;`.
    pub fn style(self) -> String {
        let (exit_x, exit_y) = self.exit.anchor();
        let (entry_x, entry_y) = self.entry.anchor();
        format!("exitX={exit_x};exitY={exit_y};entryX={entry_x};entryY={entry_y};")
    }
}

impl fmt::Display for AttachmentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.exit, self.entry)
    }
}

/// Chooses the attachment rule for an edge between two placed origins.
pub fn route(source: Point, target: Point) -> AttachmentRule {
    let (dx, dy) = source.delta_to(target);

    if dy.unsigned_abs() > dx.unsigned_abs() {
        if dy > 0 {
            AttachmentRule::DOWN
        } else {
            AttachmentRule::UP
        }
    } else if dx > 0 {
        AttachmentRule::RIGHT
    } else {
        AttachmentRule::LEFT
    }
}

/// Like [`route`], falling back to [`AttachmentRule::FALLBACK`] when either
/// placement is unknown.
pub fn route_between(source: Option<Point>, target: Option<Point>) -> AttachmentRule {
    match (source, target) {
        (Some(source), Some(target)) => route(source, target),
        _ => AttachmentRule::FALLBACK,
    }
}

/// An edge whose endpoints were both placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedEdge {
    source_id: String,
    target_id: String,
    label: Option<String>,
    rule: AttachmentRule,
}

impl RoutedEdge {
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn rule(&self) -> AttachmentRule {
        self.rule
    }
}

/// Routes every edge whose endpoints are among `placed`.
///
/// Edges naming an unknown component are dropped. When two components share
/// an id, the later one is the endpoint.
pub fn route_edges(placed: &[PlacedComponent], edges: &[EdgeSpec]) -> Vec<RoutedEdge> {
    let origins: HashMap<&str, Point> = placed
        .iter()
        .map(|component| (component.id(), component.rect().origin()))
        .collect();

    edges
        .iter()
        .filter_map(|edge| {
            let source = origins.get(edge.source_id()).copied();
            let target = origins.get(edge.target_id()).copied();
            if source.is_none() || target.is_none() {
                warn!(
                    source = edge.source_id(),
                    target = edge.target_id();
                    "Dropping edge with unresolved endpoint"
                );
                return None;
            }

            let rule = route_between(source, target);
            trace!(
                source = edge.source_id(),
                target = edge.target_id(),
                rule:% = rule;
                "Routed edge"
            );
            Some(RoutedEdge {
                source_id: edge.source_id().to_string(),
                target_id: edge.target_id().to_string(),
                label: edge.label().map(str::to_string),
                rule,
            })
        })
        .collect()
}
