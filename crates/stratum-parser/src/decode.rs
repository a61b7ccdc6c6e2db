//! Decoding of loosely typed request entries into strict specs.
//!
//! Every entry is decoded on its own. An entry that cannot be used is dropped
//! with a warning diagnostic and the remaining entries still decode.

use log::{debug, trace};
use serde_json::{Map, Value};
use stratum_core::spec::{ComponentSpec, EdgeSpec, Payload};

use crate::{
    error::{self, Diagnostic, DiagnosticCollector, ErrorCode},
    literal,
};

const STYLE_KEYS: [&str; 4] = ["styleTypeId", "style_type_id", "library_id", "libraryId"];
const LABEL_KEYS: [&str; 2] = ["label", "value"];
const PINNED_KEYS: [&str; 2] = ["pinned", "fixed"];
const SOURCE_KEYS: [&str; 3] = ["sourceId", "source_id", "source"];
const TARGET_KEYS: [&str; 3] = ["targetId", "target_id", "target"];

/// The outcome of decoding a list of entries: the usable items in request
/// order plus a warning for every entry or field that was dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    items: Vec<T>,
    diagnostics: Vec<Diagnostic>,
}

impl<T> Decoded<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (Vec<T>, Vec<Diagnostic>) {
        (self.items, self.diagnostics)
    }
}

/// Decodes a single payload into a JSON value.
///
/// Raw text is read as JSON first and as a Python-style literal second.
///
/// # Errors
///
/// Returns the literal parser's diagnostic when the text is neither.
pub fn decode_payload(payload: &Payload) -> error::Result<Value> {
    match payload {
        Payload::Structured(value) => Ok(value.clone()),
        Payload::Raw(text) => match serde_json::from_str(text) {
            Ok(value) => Ok(value),
            Err(err) => {
                trace!(err:err; "Payload is not JSON, reading as literal");
                literal::parse(text)
            }
        },
    }
}

/// Decodes component entries.
///
/// A component without an `id` is named `node_<index>` after its position in
/// `payloads`.
pub fn decode_components(payloads: &[Payload]) -> Decoded<ComponentSpec> {
    let mut collector = DiagnosticCollector::new();
    let mut items = Vec::with_capacity(payloads.len());

    for (index, payload) in payloads.iter().enumerate() {
        let context = format!("dropping component #{index}");
        let Some(map) = decode_mapping(payload, &context, &mut collector) else {
            continue;
        };
        if let Some(spec) = component_from_map(index, &map, &mut collector) {
            items.push(spec);
        }
    }

    debug!(
        requested = payloads.len(),
        decoded = items.len(),
        warnings = collector.len();
        "Decoded components"
    );
    Decoded {
        items,
        diagnostics: collector.finish(),
    }
}

/// Decodes edge entries.
pub fn decode_edges(payloads: &[Payload]) -> Decoded<EdgeSpec> {
    let mut collector = DiagnosticCollector::new();
    let mut items = Vec::with_capacity(payloads.len());

    for (index, payload) in payloads.iter().enumerate() {
        let context = format!("dropping edge #{index}");
        let Some(map) = decode_mapping(payload, &context, &mut collector) else {
            continue;
        };
        if let Some(edge) = edge_from_map(index, &map, &mut collector) {
            items.push(edge);
        }
    }

    debug!(
        requested = payloads.len(),
        decoded = items.len(),
        warnings = collector.len();
        "Decoded edges"
    );
    Decoded {
        items,
        diagnostics: collector.finish(),
    }
}

fn decode_mapping(
    payload: &Payload,
    context: &str,
    collector: &mut DiagnosticCollector,
) -> Option<Map<String, Value>> {
    match decode_payload(payload) {
        Ok(Value::Object(map)) => Some(map),
        Ok(other) => {
            collector.emit(
                Diagnostic::warning(format!(
                    "{context}: expected a mapping, found {}",
                    kind_of(&other)
                ))
                .with_code(ErrorCode::E200),
            );
            None
        }
        Err(diagnostic) => {
            collector.emit(diagnostic.into_warning(context));
            None
        }
    }
}

fn component_from_map(
    index: usize,
    map: &Map<String, Value>,
    collector: &mut DiagnosticCollector,
) -> Option<ComponentSpec> {
    let id = match map.get("id").and_then(id_text) {
        Some(id) => id,
        None => format!("node_{index}"),
    };

    let Some(style_type_id) = first_of(map, &STYLE_KEYS).and_then(id_text) else {
        collector.emit(
            Diagnostic::warning(format!("dropping component `{id}`: no style type id"))
                .with_code(ErrorCode::E201)
                .with_help("set `styleTypeId` to a component type from the catalog"),
        );
        return None;
    };

    let mut spec = ComponentSpec::new(id.clone(), style_type_id);

    if let Some(label) = first_of(map, &LABEL_KEYS) {
        match label {
            Value::String(text) => spec = spec.with_label(text.clone()),
            Value::Number(n) => spec = spec.with_label(n.to_string()),
            Value::Null => {}
            other => invalid_field(collector, &id, "label", other),
        }
    }

    let x = number_field(map, "x", &id, collector);
    let y = number_field(map, "y", &id, collector);
    if x.is_some() || y.is_some() {
        spec = spec.with_position(x.unwrap_or_default(), y.unwrap_or_default());
    }

    if let Some(width) = number_field(map, "width", &id, collector) {
        spec = spec.with_width(width);
    }
    if let Some(height) = number_field(map, "height", &id, collector) {
        spec = spec.with_height(height);
    }

    if let Some(pinned) = first_of(map, &PINNED_KEYS) {
        match pinned {
            Value::Bool(flag) => spec = spec.pinned(*flag),
            Value::Null => {}
            other => invalid_field(collector, &id, "pinned", other),
        }
    }

    Some(spec)
}

fn edge_from_map(
    index: usize,
    map: &Map<String, Value>,
    collector: &mut DiagnosticCollector,
) -> Option<EdgeSpec> {
    let source = first_of(map, &SOURCE_KEYS).and_then(id_text);
    let target = first_of(map, &TARGET_KEYS).and_then(id_text);

    let (Some(source), Some(target)) = (source, target) else {
        collector.emit(
            Diagnostic::warning(format!("dropping edge #{index}: missing source or target id"))
                .with_code(ErrorCode::E202)
                .with_help("edges need both `sourceId` and `targetId`"),
        );
        return None;
    };

    let mut edge = EdgeSpec::new(source, target);
    match map.get("label") {
        Some(Value::String(text)) => edge = edge.with_label(text.clone()),
        Some(Value::Number(n)) => edge = edge.with_label(n.to_string()),
        Some(Value::Null) | None => {}
        Some(other) => {
            let name = format!("edge #{index}");
            invalid_field(collector, &name, "label", other);
        }
    }

    Some(edge)
}

/// Returns the value of the first alias present in `map`.
fn first_of<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| map.get(*key))
}

/// Reads an identifier. Numbers are stringified; empty strings count as absent.
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn number_field(
    map: &Map<String, Value>,
    key: &str,
    id: &str,
    collector: &mut DiagnosticCollector,
) -> Option<f64> {
    let value = map.get(key)?;
    let parsed = match value {
        Value::Null => return None,
        Value::Number(n) => n.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match parsed.filter(|n| n.is_finite()) {
        Some(n) => Some(n),
        None => {
            invalid_field(collector, id, key, value);
            None
        }
    }
}

fn invalid_field(collector: &mut DiagnosticCollector, owner: &str, field: &str, value: &Value) {
    collector.emit(
        Diagnostic::warning(format!(
            "`{owner}`: ignoring `{field}`, {} is not usable here",
            kind_of(value)
        ))
        .with_code(ErrorCode::E203),
    );
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
