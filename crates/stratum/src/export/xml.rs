//! XML writing on top of `quick-xml`.
//!
//! Documents are written compactly first, then read back and written again
//! with indentation by [`pretty`]. Reading back checks that every element is
//! closed in order; a malformed document is a [`FormatError`].

use std::{io, string::FromUtf8Error};

use quick_xml::{
    Reader, Writer,
    events::{BytesStart, Event},
};
use thiserror::Error;

/// Declaration line put in front of every pretty-printed document.
pub const DECLARATION: &str = r#"<?xml version="1.0" ?>"#;

/// Errors raised while writing or re-indenting a document.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("malformed document at byte {offset}: {source}")]
    Malformed {
        offset: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("{open} element(s) left open at end of document")]
    Unclosed { open: usize },

    #[error("failed to write document: {0}")]
    Write(#[from] io::Error),

    #[error("document is not UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),
}

/// A start (or empty) tag with attributes in the given order.
///
/// Attribute values are escaped, including both quote characters.
pub fn tag<'a>(name: &'a str, attributes: &[(&str, &str)]) -> BytesStart<'a> {
    BytesStart::new(name).with_attributes(attributes.iter().copied())
}

/// Re-indents a compact document, one tag per line, nesting by `indent`.
///
/// The output starts with [`DECLARATION`]; any declaration in `raw` is
/// dropped, as is whitespace between tags.
///
/// # Errors
///
/// Returns a [`FormatError`] if closing tags do not match their opening tags
/// or an element is never closed.
pub fn pretty(raw: &str, indent: u8) -> Result<String, FormatError> {
    let mut reader = Reader::from_str(raw);
    reader.config_mut().trim_text(true);

    let mut out = Vec::with_capacity(raw.len() * 2);
    out.extend_from_slice(DECLARATION.as_bytes());
    out.push(b'\n');
    let mut writer = Writer::new_with_indent(out, indent, 1);

    let mut open = 0usize;
    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(source) => {
                return Err(FormatError::Malformed {
                    offset: reader.error_position() as u64,
                    source,
                });
            }
        };

        match event {
            Event::Eof => break,
            Event::Decl(_) => continue,
            Event::Start(_) => open += 1,
            Event::End(_) => open = open.saturating_sub(1),
            _ => {}
        }
        writer.write_event(event)?;
    }

    if open > 0 {
        return Err(FormatError::Unclosed { open });
    }

    let mut out = writer.into_inner();
    out.push(b'\n');
    Ok(String::from_utf8(out)?)
}
