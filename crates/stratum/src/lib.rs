//! Stratum - tier-ordered architecture diagrams for draw.io.
//!
//! Stratum turns an agent-produced list of components and edges into a laid
//! out draw.io document and stores it as a versioned artifact. Components are
//! classified into architectural tiers, stacked row by row, framed by an
//! optional system boundary and connected with orthogonal edges whose sides
//! follow the relative placement of their endpoints.

pub mod boundary;
pub mod classify;
pub mod component;
pub mod config;
pub mod export;
pub mod layout;
pub mod route;
pub mod store;

mod error;
mod request;


pub use stratum_core::{catalog, geometry, spec, tier};
pub use stratum_parser::error::Diagnostic;

pub use error::StratumError;
pub use request::GenerationRequest;

use std::path::{Path, PathBuf};

use log::{debug, info, trace};

use stratum_core::catalog::{ComponentType, StyleCatalog};

use boundary::BoundaryRule;
use component::{Component, PlacedComponent};
use config::AppConfig;
use export::drawio::DrawioWriter;
use store::{Provenance, Version, VersionStore};

/// A rendered, not yet stored, document.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    document: String,
    placed: Vec<PlacedComponent>,
    edges: usize,
    decoded_components: usize,
    multiplier: f64,
    diagnostics: Vec<Diagnostic>,
}

impl Rendered {
    /// The pretty-printed document text.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// The emitted components in request order, with final geometry.
    pub fn placed(&self) -> &[PlacedComponent] {
        &self.placed
    }

    /// Looks up an emitted component by request id. With duplicate ids the
    /// later component is returned.
    pub fn component(&self, id: &str) -> Option<&PlacedComponent> {
        self.placed.iter().rev().find(|placed| placed.id() == id)
    }

    /// Number of emitted edges.
    pub fn edge_count(&self) -> usize {
        self.edges
    }

    /// Number of component entries that decoded, before catalog resolution.
    pub fn decoded_components(&self) -> usize {
        self.decoded_components
    }

    /// The multiplier the layout actually used.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Warnings for entries that were dropped while decoding.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

/// A stored artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    path: PathBuf,
    version: Version,
    sidecar: Option<PathBuf>,
    rendered: Rendered,
}

impl Artifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> Version {
        self.version
    }

    /// The provenance sidecar, written only when the request had a prompt.
    pub fn sidecar(&self) -> Option<&Path> {
        self.sidecar.as_deref()
    }

    pub fn rendered(&self) -> &Rendered {
        &self.rendered
    }
}

/// Generates diagrams.
///
/// The engine owns its configuration and the style catalog; both are read
/// only, so one engine serves any number of requests.
///
/// # Examples
///
/// ```rust,no_run
/// use stratum::{DiagramEngine, GenerationRequest, catalog::StyleCatalog, config::AppConfig};
/// use serde_json::json;
///
/// let catalog = StyleCatalog::load("assets/library.json").expect("Failed to load catalog");
/// let engine = DiagramEngine::new(AppConfig::default(), catalog);
///
/// let request = GenerationRequest::new(
///     [
///         json!({"id": "u1", "styleTypeId": "actor", "label": "User"}).into(),
///         json!({"id": "s1", "styleTypeId": "service", "label": "api-orders"}).into(),
///     ],
///     [json!({"sourceId": "u1", "targetId": "s1", "label": "Uses"}).into()],
/// )
/// .with_name("shop");
///
/// let artifact = engine.generate(&request).expect("Failed to generate");
/// println!("{}", artifact.path().display());
/// ```
#[derive(Debug, Clone)]
pub struct DiagramEngine {
    config: AppConfig,
    catalog: StyleCatalog,
    boundary_rule: BoundaryRule,
    store: VersionStore,
}

impl DiagramEngine {
    /// Create a new engine with the given configuration and catalog.
    pub fn new(config: AppConfig, catalog: StyleCatalog) -> Self {
        let boundary_rule = BoundaryRule::new(config.boundary());
        let store = VersionStore::new(config.output());
        Self {
            config,
            catalog,
            boundary_rule,
            store,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn catalog(&self) -> &StyleCatalog {
        &self.catalog
    }

    /// Lists the component types agents may request.
    ///
    /// `category` is accepted but does not filter.
    pub fn list_component_types(&self, category: Option<&str>) -> Vec<ComponentType> {
        self.catalog.list_component_types(category)
    }

    /// Lays out and serializes a request without storing it.
    ///
    /// Entries that cannot be decoded, components with unknown style types
    /// and edges with unknown endpoints are dropped; only formatting the
    /// document can fail.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Format`] if the document cannot be written,
    /// carrying the unformatted document when only pretty-printing failed.
    pub fn render(&self, request: &GenerationRequest) -> Result<Rendered, StratumError> {
        info!(
            components = request.components().len(),
            edges = request.edges().len();
            "Rendering diagram"
        );

        let (specs, mut diagnostics) =
            stratum_parser::decode_components(request.components()).into_parts();
        let (edge_specs, edge_diagnostics) =
            stratum_parser::decode_edges(request.edges()).into_parts();
        diagnostics.extend(edge_diagnostics);

        let multiplier = layout::effective_multiplier(request.scale());
        let components: Vec<Component> = specs
            .iter()
            .enumerate()
            .filter_map(|(order, spec)| Component::resolve(order, spec, &self.catalog))
            .collect();
        debug!(
            decoded = specs.len(),
            resolved = components.len();
            "Resolved components against catalog"
        );

        let mut pinned = Vec::new();
        let mut boundaries = Vec::new();
        let mut tiered = Vec::new();
        for component in components {
            if component.is_pinned() {
                pinned.push(PlacedComponent::untiered(component));
            } else if self.boundary_rule.matches(&component) {
                boundaries.push(PlacedComponent::untiered(component));
            } else {
                tiered.push(component);
            }
        }

        let tiers = classify::classify(tiered);
        let (mut placed, bounds) =
            layout::layout(&tiers, multiplier, self.config.layout()).into_parts();
        placed.extend(boundary::resize_boundaries(
            boundaries,
            bounds,
            self.config.boundary(),
            multiplier,
        ));
        placed.extend(pinned);
        placed.sort_by_key(|placed| placed.component().order());
        trace!(placed:?; "Placed components");

        let edges = route::route_edges(&placed, &edge_specs);
        let raw = DrawioWriter::new()
            .document(&placed, &edges)
            .map_err(|err| StratumError::new_format_error(err, String::new()))?;
        let document = export::render(raw)?;

        Ok(Rendered {
            document,
            placed,
            edges: edges.len(),
            decoded_components: specs.len(),
            multiplier,
            diagnostics,
        })
    }

    /// Renders a request and stores it as the next version of its name.
    ///
    /// A provenance sidecar is written next to the artifact when the request
    /// carries a prompt. It records the multiplier as requested, even when
    /// layout fell back to `1.0`.
    ///
    /// # Errors
    ///
    /// Returns [`StratumError::Format`] if the document cannot be formatted,
    /// and [`StratumError::Persist`] or [`StratumError::Io`] if it cannot be
    /// written.
    pub fn generate(&self, request: &GenerationRequest) -> Result<Artifact, StratumError> {
        let rendered = self.render(request)?;
        let (path, version) = self.store.store(request.name(), rendered.document())?;

        let sidecar = match request.prompt() {
            Some(prompt) => {
                let provenance =
                    Provenance::new(prompt, request.scale(), rendered.decoded_components());
                Some(self.store.persist_sidecar(&path, &provenance)?)
            }
            None => None,
        };

        info!(path:? = path, version:% = version; "Diagram generated");
        Ok(Artifact {
            path,
            version,
            sidecar,
            rendered,
        })
    }
}
