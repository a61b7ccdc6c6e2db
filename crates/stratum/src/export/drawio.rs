//! draw.io document serialization.
//!
//! Placed components become `vertex` cells and routed edges become `edge`
//! cells inside the `mxfile` envelope that draw.io opens directly. Every cell
//! gets a fresh id from a [`CellIds`] source; edges refer to the cell ids of
//! their endpoints, never to request ids.

use std::collections::HashMap;

use log::{debug, trace};
use quick_xml::{
    Writer,
    events::{BytesEnd, Event},
};

use crate::{
    component::PlacedComponent,
    export::xml::{FormatError, tag},
    route::RoutedEdge,
};

/// Base style shared by every connector. The attachment anchors are appended.
pub const EDGE_STYLE: &str =
    "edgeStyle=orthogonalEdgeStyle;rounded=0;orthogonalLoop=1;jettySize=auto;html=1;";

/// Elements wrapping the cells, outermost first.
const ENVELOPE: [(&str, &[(&str, &str)]); 4] = [
    (
        "mxfile",
        &[
            ("host", "Electron"),
            ("agent", "Mozilla/5.0"),
            ("version", "24.7.17"),
        ],
    ),
    ("diagram", &[("name", "Page-1"), ("id", "demo-diagram")]),
    (
        "mxGraphModel",
        &[
            ("dx", "1422"),
            ("dy", "762"),
            ("grid", "1"),
            ("gridSize", "10"),
            ("guides", "1"),
            ("tooltips", "1"),
            ("connect", "1"),
            ("arrows", "1"),
            ("fold", "1"),
            ("page", "1"),
            ("pageScale", "1"),
            ("pageWidth", "850"),
            ("pageHeight", "1100"),
            ("math", "0"),
            ("shadow", "0"),
        ],
    ),
    ("root", &[]),
];

/// Source of unique cell ids.
pub trait CellIds {
    /// Returns a new id starting with `prefix`.
    fn next_id(&mut self, prefix: &str) -> String;
}

/// Random ids shaped like version 4 UUIDs, e.g. `node-3f2b…`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl CellIds for RandomIds {
    fn next_id(&mut self, prefix: &str) -> String {
        let bits: u128 = rand::random();
        // Set the version (4) and variant (10xx) bits
        let bits = (bits & !(0xf << 76) & !(0x3 << 62)) | (0x4 << 76) | (0x2 << 62);
        let hex = format!("{bits:032x}");
        format!(
            "{prefix}-{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }
}

/// Builds draw.io documents.
#[derive(Debug, Default)]
pub struct DrawioWriter<I = RandomIds> {
    ids: I,
}

impl DrawioWriter<RandomIds> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: CellIds> DrawioWriter<I> {
    /// Creates a writer drawing cell ids from `ids`.
    pub fn with_ids(ids: I) -> Self {
        Self { ids }
    }

    /// Writes the compact document for `components` and `edges`.
    ///
    /// Components are emitted in slice order. An edge is emitted only if both
    /// of its endpoints were emitted; with duplicate component ids the later
    /// component is the endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the document cannot be written.
    pub fn document(
        &mut self,
        components: &[PlacedComponent],
        edges: &[RoutedEdge],
    ) -> Result<String, FormatError> {
        let mut writer = Writer::new(Vec::new());
        for (name, attributes) in ENVELOPE {
            writer.write_event(Event::Start(tag(name, attributes)))?;
        }
        writer.write_event(Event::Empty(tag("mxCell", &[("id", "0")])))?;
        writer.write_event(Event::Empty(tag("mxCell", &[("id", "1"), ("parent", "0")])))?;

        let mut cell_ids: HashMap<&str, String> = HashMap::new();
        for component in components {
            let cell_id = self.ids.next_id("node");
            trace!(id = component.id(), cell_id; "Emitting node cell");
            write_node(&mut writer, &cell_id, component)?;
            cell_ids.insert(component.id(), cell_id);
        }

        let mut emitted_edges = 0;
        for edge in edges {
            let (Some(source), Some(target)) = (
                cell_ids.get(edge.source_id()),
                cell_ids.get(edge.target_id()),
            ) else {
                debug!(
                    source = edge.source_id(),
                    target = edge.target_id();
                    "Skipping edge without emitted endpoints"
                );
                continue;
            };

            let cell_id = self.ids.next_id("edge");
            write_edge(&mut writer, &cell_id, edge, source, target)?;
            emitted_edges += 1;
        }

        for (name, _) in ENVELOPE.iter().rev() {
            writer.write_event(Event::End(BytesEnd::new(*name)))?;
        }

        debug!(nodes = components.len(), edges = emitted_edges; "Built draw.io document");
        Ok(String::from_utf8(writer.into_inner())?)
    }
}

fn write_node(
    writer: &mut Writer<Vec<u8>>,
    cell_id: &str,
    component: &PlacedComponent,
) -> Result<(), FormatError> {
    let rect = component.rect();
    let [x, y, width, height] =
        [rect.x(), rect.y(), rect.width(), rect.height()].map(|n| n.to_string());

    writer.write_event(Event::Start(tag(
        "mxCell",
        &[
            ("id", cell_id),
            ("value", component.component().label()),
            ("style", component.component().style()),
            ("vertex", "1"),
            ("parent", "1"),
        ],
    )))?;
    writer.write_event(Event::Empty(tag(
        "mxGeometry",
        &[
            ("x", x.as_str()),
            ("y", y.as_str()),
            ("width", width.as_str()),
            ("height", height.as_str()),
            ("as", "geometry"),
        ],
    )))?;
    writer.write_event(Event::End(BytesEnd::new("mxCell")))?;
    Ok(())
}

fn write_edge(
    writer: &mut Writer<Vec<u8>>,
    cell_id: &str,
    edge: &RoutedEdge,
    source: &str,
    target: &str,
) -> Result<(), FormatError> {
    let style = format!("{EDGE_STYLE}{}", edge.rule().style());

    writer.write_event(Event::Start(tag(
        "mxCell",
        &[
            ("id", cell_id),
            ("value", edge.label().unwrap_or_default()),
            ("style", style.as_str()),
            ("edge", "1"),
            ("parent", "1"),
            ("source", source),
            ("target", target),
        ],
    )))?;
    writer.write_event(Event::Empty(tag(
        "mxGeometry",
        &[("relative", "1"), ("as", "geometry")],
    )))?;
    writer.write_event(Event::End(BytesEnd::new("mxCell")))?;
    Ok(())
}
