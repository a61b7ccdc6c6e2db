//! Document export.
//!
//! This module turns placed components and routed edges into the text of a
//! draw.io document. It is the last pure stage of the pipeline; writing the
//! text to disk belongs to [`crate::store`].
//!
//! # Pipeline Position
//!
//! ```text
//! Payloads
//!     ↓ decode
//! Component / Edge specs
//!     ↓ resolve, classify, layout, resize boundary
//! Placed components
//!     ↓ route
//! Routed edges
//!     ↓ export (this module)
//! Document text
//! ```
//!
//! # Error Handling
//!
//! Writing either form of the document goes through `quick-xml` and fails
//! only on a malformed document. When pretty-printing fails, [`render`]
//! returns [`StratumError::Format`] holding the compact text.
//!
//! [`StratumError::Format`]: crate::StratumError::Format

pub mod drawio;
pub mod xml;

pub use xml::FormatError;

use log::error;

use crate::error::StratumError;

/// Indentation used for pretty-printed documents.
pub const INDENT: u8 = b'\t';

/// Pretty-prints the compact document `raw`.
///
/// # Errors
///
/// Returns [`StratumError::Format`] carrying `raw` if it cannot be
/// re-indented.
pub fn render(raw: String) -> Result<String, StratumError> {
    match xml::pretty(&raw, INDENT) {
        Ok(document) => Ok(document),
        Err(err) => {
            error!(err:err; "Failed to pretty-print document");
            Err(StratumError::new_format_error(err, raw))
        }
    }
}
