use proptest::prelude::*;
use serde_json::json;

use crate::{decode_components, literal};
use stratum_core::spec::Payload;

// ===================
// Strategies
// ===================

/// Strategy for label text, including quotes and backslashes.
fn label_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 _'\"\\\\<>&-]{0,24}"
}

/// Strategy for identifiers that are not literal keywords.
fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_-]{0,12}"
}

/// Writes `text` the way Python's `repr` writes a single-quoted string.
fn python_quote(text: &str) -> String {
    let mut out = String::from("'");
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

// ===================
// Property Test Functions
// ===================

/// A quoted label reads back as the original text.
fn check_quoted_label_reads_back(label: &str) -> Result<(), TestCaseError> {
    let source = format!("{{'label': {}}}", python_quote(label));
    let value = literal::parse(&source);

    prop_assert_eq!(value.ok(), Some(json!({ "label": label })));
    Ok(())
}

/// Arbitrary text never panics, and any error span stays inside the text.
fn check_error_span_in_bounds(source: &str) -> Result<(), TestCaseError> {
    if let Err(diag) = literal::parse(source) {
        let label = diag.label();
        prop_assert!(label.is_some(), "error without label for `{source}`");
        if let Some(label) = label {
            prop_assert!(label.span().end() <= source.len());
        }
    }
    Ok(())
}

/// Every well-formed component entry survives decoding with its id.
fn check_components_keep_ids(ids: &[String]) -> Result<(), TestCaseError> {
    let payloads: Vec<Payload> = ids
        .iter()
        .map(|id| Payload::from(format!("{{'id': '{id}', 'styleTypeId': 'service'}}")))
        .collect();
    let decoded = decode_components(&payloads);

    prop_assert!(decoded.diagnostics().is_empty());
    let decoded_ids: Vec<&str> = decoded.items().iter().map(|c| c.id()).collect();
    let expected: Vec<&str> = ids.iter().map(String::as_str).collect();
    prop_assert_eq!(decoded_ids, expected);
    Ok(())
}

// ===================
// Proptest Wrappers
// ===================

proptest! {
    #[test]
    fn quoted_label_reads_back(label in label_strategy()) {
        check_quoted_label_reads_back(&label)?;
    }

    #[test]
    fn error_span_in_bounds(source in "[{}\\[\\]()'\":, a-zA-Z0-9._-]{0,40}") {
        check_error_span_in_bounds(&source)?;
    }

    #[test]
    fn components_keep_ids(ids in prop::collection::vec(identifier_strategy(), 0..8)) {
        check_components_keep_ids(&ids)?;
    }
}
