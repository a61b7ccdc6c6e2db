//! Stratum Payload Decoder
//!
//! This crate turns the loosely typed entries of a diagram request into the
//! strict [`ComponentSpec`] and [`EdgeSpec`] values the engine works on.
//!
//! # Pipeline
//!
//! Each entry passes through two stages:
//!
//! 1. **Reading** - raw text is read as JSON, or failing that as a
//!    Python-style literal ([`decode_payload`])
//! 2. **Decoding** - the resulting mapping is checked and its field aliases
//!    resolved ([`decode_components`], [`decode_edges`])
//!
//! An entry that fails either stage is dropped with a warning [`Diagnostic`];
//! the other entries are unaffected.
//!
//! # Example
//!
//! ```
//! # use stratum_core::spec::Payload;
//! # use stratum_parser::decode_components;
//! let decoded = decode_components(&[
//!     Payload::from("{'id': 'u1', 'styleTypeId': 'actor', 'label': 'Website User'}"),
//!     Payload::from("{'id': 'broken'"),
//! ]);
//!
//! assert_eq!(decoded.items().len(), 1);
//! assert_eq!(decoded.diagnostics().len(), 1);
//! ```
//!
//! [`ComponentSpec`]: stratum_core::spec::ComponentSpec
//! [`EdgeSpec`]: stratum_core::spec::EdgeSpec
//! [`Diagnostic`]: error::Diagnostic

mod decode;
pub mod error;
mod literal;
mod span;

#[cfg(test)]
mod proptest_tests;

pub use decode::{Decoded, decode_components, decode_edges, decode_payload};
pub use span::Span;
