//! Integration tests for the DiagramEngine API

use std::{fs, path::Path};

use serde_json::json;

use stratum::{
    DiagramEngine, GenerationRequest,
    catalog::{StyleCatalog, StyleEntry},
    config::AppConfig,
    geometry::{Rect, Size},
    spec::Payload,
    store::Version,
    tier::Tier,
};

fn catalog() -> StyleCatalog {
    StyleCatalog::from_entries([
        StyleEntry::new("actor", "User", "shape=umlActor;", 30.0, 60.0),
        StyleEntry::new("service", "service", "rounded=1;", 120.0, 60.0),
        StyleEntry::new("cylinder", "DB", "shape=cylinder3;", 60.0, 100.0),
        StyleEntry::new("system_boundary", "System", "dashed=1;fillColor=none;", 400.0, 300.0),
    ])
}

fn engine(dir: &Path) -> DiagramEngine {
    DiagramEngine::new(AppConfig::default().with_output_directory(dir), catalog())
}

fn payload(value: serde_json::Value) -> Payload {
    Payload::from(value)
}

fn user_and_service() -> GenerationRequest {
    GenerationRequest::new(
        [
            payload(json!({"id": "u1", "styleTypeId": "actor", "label": "User"})),
            payload(json!({"id": "s1", "styleTypeId": "service", "label": "api-orders"})),
        ],
        [payload(json!({"sourceId": "u1", "targetId": "s1", "label": "Uses"}))],
    )
}

fn rect(rendered: &stratum::Rendered, id: &str) -> Rect {
    rendered
        .component(id)
        .unwrap_or_else(|| panic!("component `{id}` was not emitted"))
        .rect()
}

#[test]
fn test_user_above_service() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = engine(dir.path()).render(&user_and_service()).unwrap();

    let user = rendered.component("u1").unwrap();
    let service = rendered.component("s1").unwrap();
    assert_eq!(user.tier(), Some(Tier::User));
    assert_eq!(service.tier(), Some(Tier::Service));
    assert_eq!((user.rect().x(), user.rect().y()), (625, 100));
    assert_eq!((service.rect().x(), service.rect().y()), (625, 350));

    let document = rendered.document();
    assert!(document.starts_with("<?xml version=\"1.0\" ?>\n<mxfile"));
    assert_eq!(document.matches("vertex=\"1\"").count(), 2);
    assert_eq!(document.matches("edge=\"1\"").count(), 1);
    assert!(document.contains("exitX=0.5;exitY=1;entryX=0.5;entryY=0;"));
    assert!(document.contains("value=\"Uses\""));
    assert!(rendered.diagnostics().is_empty());
}

#[test]
fn test_boundary_frames_internal_tiers() {
    let dir = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        [
            payload(json!({"id": "frame", "styleTypeId": "system_boundary", "x": 0, "y": 0})),
            payload(json!({"id": "u1", "styleTypeId": "actor", "label": "Customer"})),
            payload(json!({"id": "s1", "styleTypeId": "service", "label": "api-orders"})),
            payload(json!({"id": "d1", "styleTypeId": "cylinder", "label": "Orders DB"})),
        ],
        [],
    );
    let rendered = engine(dir.path()).render(&request).unwrap();

    assert_eq!(rendered.component("frame").unwrap().tier(), None);
    let frame = rect(&rendered, "frame").bounds();
    assert!(frame.contains(&rect(&rendered, "s1").bounds()));
    assert!(frame.contains(&rect(&rendered, "d1").bounds()));
    assert!(!frame.contains(&rect(&rendered, "u1").bounds()));

    // Service row at y=350, database row at y=600 with the fixed 80x80 footprint
    assert_eq!(rect(&rendered, "d1").size().width(), 80);
    assert_eq!((frame.min_x(), frame.min_y()), (565, 250));
    assert_eq!((frame.max_x(), frame.max_y()), (805, 740));

    // Boundaries are emitted first when requested first
    let first_vertex = rendered.document().find("vertex=\"1\"").unwrap();
    let boundary_style = rendered.document().find("dashed=1;fillColor=none;").unwrap();
    assert!(boundary_style < first_vertex);
}

#[test]
fn test_boundary_without_internal_components_keeps_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        [
            payload(json!({"id": "frame", "styleTypeId": "system_boundary", "x": 10, "y": 20})),
            payload(json!({"id": "u1", "styleTypeId": "actor"})),
        ],
        [],
    );
    let rendered = engine(dir.path()).render(&request).unwrap();

    let frame = rect(&rendered, "frame");
    assert_eq!((frame.x(), frame.y()), (10, 20));
    assert_eq!((frame.width(), frame.height()), (400, 300));
}

#[test]
fn test_pinned_component_keeps_requested_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        [
            payload(json!({"id": "title", "styleTypeId": "service", "x": 550, "y": 50, "pinned": true})),
            payload(json!({"id": "s1", "styleTypeId": "service", "x": 5, "y": 5})),
        ],
        [],
    );
    let rendered = engine(dir.path()).render(&request).unwrap();

    assert_eq!(rendered.component("title").unwrap().tier(), None);
    assert_eq!((rect(&rendered, "title").x(), rect(&rendered, "title").y()), (550, 50));
    // Unpinned positions are overwritten by the grid
    assert_eq!((rect(&rendered, "s1").x(), rect(&rendered, "s1").y()), (625, 100));
}

#[test]
fn test_extreme_coordinates_saturate() {
    let dir = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        [
            payload(json!({"id": "far-left", "styleTypeId": "service", "x": -3e9, "y": 0, "pinned": true})),
            payload(json!({"id": "far-right", "styleTypeId": "service", "x": 3e9, "y": 0, "pinned": true})),
            payload(json!({"id": "frame", "styleTypeId": "system_boundary"})),
            payload(json!({"id": "wide", "styleTypeId": "service", "width": 3e9})),
        ],
        [payload(json!({"sourceId": "far-left", "targetId": "far-right"}))],
    );
    let rendered = engine(dir.path()).render(&request).unwrap();

    assert_eq!(rect(&rendered, "far-left").x(), i32::MIN);
    assert_eq!(rect(&rendered, "far-right").x(), i32::MAX);
    assert_eq!(rect(&rendered, "wide").width(), i32::MAX);
    let frame = rect(&rendered, "frame").bounds();
    assert!(frame.contains(&rect(&rendered, "wide").bounds()));

    assert_eq!(rendered.edge_count(), 1);
    assert!(
        rendered
            .document()
            .contains("exitX=1;exitY=0.5;entryX=0;entryY=0.5;")
    );
}

#[test]
fn test_single_dimension_overrides_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        [
            payload(json!({"id": "s1", "styleTypeId": "service", "width": 200})),
            payload(json!({"id": "s2", "styleTypeId": "service", "height": 90})),
        ],
        [],
    );
    let rendered = engine(dir.path()).render(&request).unwrap();

    assert_eq!(rect(&rendered, "s1").size(), Size::new(200, 60));
    assert_eq!(rect(&rendered, "s2").size(), Size::new(120, 90));
    assert!(rendered.diagnostics().is_empty());
    assert!(rendered.document().contains(r#"width="200" height="60""#));
}

#[test]
fn test_unknown_style_and_dangling_edges_are_dropped() {
    let dir = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        [
            payload(json!({"id": "s1", "styleTypeId": "service"})),
            payload(json!({"id": "x1", "styleTypeId": "no-such-style"})),
            payload(json!(42)),
        ],
        [
            payload(json!({"sourceId": "s1", "targetId": "x1"})),
            payload(json!({"sourceId": "s1"})),
        ],
    );
    let rendered = engine(dir.path()).render(&request).unwrap();

    assert!(rendered.component("x1").is_none());
    assert_eq!(rendered.placed().len(), 1);
    assert_eq!(rendered.edge_count(), 0);
    assert_eq!(rendered.decoded_components(), 2);
    assert_eq!(rendered.diagnostics().len(), 2);
    assert!(!rendered.document().contains("edge=\"1\""));
}

#[test]
fn test_raw_literal_payloads() {
    let dir = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        [
            Payload::from("{'id': 'c1', 'label': 'Customer', 'library_id': 'actor'}"),
            Payload::from("{'id': 'c2', 'label': 'Admin Panel [tier:frontend]', 'library_id': 'service'}"),
            Payload::from("{'id': 'c3', 'label': 'api-core', 'library_id': 'service', 'fixed': False}"),
        ],
        [Payload::from("{'source': 'c2', 'target': 'c3', 'label': None}")],
    );
    let rendered = engine(dir.path()).render(&request).unwrap();

    assert_eq!(rendered.component("c1").unwrap().tier(), Some(Tier::User));
    assert_eq!(rendered.component("c2").unwrap().tier(), Some(Tier::Frontend));
    assert_eq!(rendered.component("c3").unwrap().tier(), Some(Tier::Service));
    assert_eq!(rendered.edge_count(), 1);
}

#[test]
fn test_labels_are_escaped() {
    let dir = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(
        [payload(json!({"id": "s1", "styleTypeId": "service", "label": "A & B <\"x\">"}))],
        [],
    );
    let rendered = engine(dir.path()).render(&request).unwrap();

    assert!(
        rendered
            .document()
            .contains("value=\"A &amp; B &lt;&quot;x&quot;&gt;\"")
    );
}

#[test]
fn test_geometry_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path());
    let request = user_and_service().with_scale(1.5);

    let first = engine.render(&request).unwrap();
    let second = engine.render(&request).unwrap();

    let geometry = |rendered: &stratum::Rendered| -> Vec<Rect> {
        rendered.placed().iter().map(|p| p.rect()).collect()
    };
    assert_eq!(geometry(&first), geometry(&second));
    assert_eq!((rect(&first, "u1").x(), rect(&first, "u1").y()), (937, 150));
    // Cell ids are fresh per render
    assert_ne!(first.document(), second.document());
}

#[test]
fn test_invalid_scale_falls_back_to_one() {
    let dir = tempfile::tempdir().unwrap();
    let rendered = engine(dir.path())
        .render(&user_and_service().with_scale(-2.0))
        .unwrap();

    assert_eq!(rendered.multiplier(), 1.0);
    assert_eq!(rect(&rendered, "s1").y(), 350);
}

#[test]
fn test_generate_versions_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path());
    let request = user_and_service().with_name("todo_system");

    let first = engine.generate(&request).unwrap();
    let second = engine.generate(&request).unwrap();

    assert_eq!(first.version(), Version::new(1, 0, 0));
    assert_eq!(second.version(), Version::new(1, 0, 1));
    assert_eq!(first.path(), dir.path().join("todo_system_v1.0.0.drawio"));
    assert_eq!(second.path(), dir.path().join("todo_system_v1.0.1.drawio"));
    assert!(first.sidecar().is_none());

    let written = fs::read_to_string(first.path()).unwrap();
    assert_eq!(written, first.rendered().document());
}

#[test]
fn test_generate_sanitizes_name() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path());

    let artifact = engine
        .generate(&user_and_service().with_name("../my system!"))
        .unwrap();
    assert_eq!(artifact.path(), dir.path().join("mysystem_v1.0.0.drawio"));

    let artifact = engine.generate(&user_and_service().with_name("")).unwrap();
    assert_eq!(
        artifact.path(),
        dir.path().join("system_architecture_v1.0.0.drawio")
    );
}

#[test]
fn test_generate_writes_sidecar() {
    let dir = tempfile::tempdir().unwrap();
    let request = user_and_service()
        .with_name("shop")
        .with_scale(1.5)
        .with_prompt("An actor using an orders API");

    let artifact = engine(dir.path()).generate(&request).unwrap();

    let sidecar = artifact.sidecar().unwrap();
    assert_eq!(sidecar, dir.path().join("prompts").join("shop_v1.0.0.md"));
    let text = fs::read_to_string(sidecar).unwrap();
    assert!(text.contains("An actor using an orders API"));
    assert!(text.contains("- Multiplier: 1.5"));
    assert!(text.contains("- Components: 2"));
}

#[test]
fn test_sidecar_records_requested_multiplier() {
    let dir = tempfile::tempdir().unwrap();
    let request = user_and_service()
        .with_name("shop")
        .with_scale(-2.0)
        .with_prompt("An actor using an orders API");

    let artifact = engine(dir.path()).generate(&request).unwrap();

    assert_eq!(artifact.rendered().multiplier(), 1.0);
    let text = fs::read_to_string(artifact.sidecar().unwrap()).unwrap();
    assert!(text.contains("- Multiplier: -2.0\n"));
}

#[test]
fn test_list_component_types() {
    let dir = tempfile::tempdir().unwrap();
    let engine = engine(dir.path());

    let all = engine.list_component_types(None);
    let filtered = engine.list_component_types(Some("databases"));

    assert_eq!(all.len(), 4);
    assert_eq!(all[0].id, "actor");
    assert_eq!(all, filtered);
}

#[test]
fn test_bundled_library_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../assets/library.json");
    let catalog = StyleCatalog::load(path).unwrap();

    assert!(catalog.get("system_boundary").is_some());
    assert!(catalog.get("MUqYMd9_9H_2uWHAdu_l-4").is_some());
    assert!(catalog.get("service").is_some());
}
