//! Diagnostics for payload decoding.
//!
//! The error system is built around the [`Diagnostic`] type: one error or
//! warning with an optional [`ErrorCode`], an optional labeled span into the
//! raw payload text, and help text. The literal parser fails with a single
//! error diagnostic; the request decoder demotes such failures to warnings and
//! accumulates them in a [`DiagnosticCollector`] so decoding continues.
//!
//! # Example
//!
//! ```
//! # use stratum_parser::error::{Diagnostic, ErrorCode, Severity};
//! let diag = Diagnostic::warning("dropping edge #3")
//!     .with_code(ErrorCode::E202)
//!     .with_help("edges need `source` and `target` ids");
//!
//! assert_eq!(diag.severity(), Severity::Warning);
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use severity::Severity;

/// Result of reading one payload: the value, or the diagnostic that stopped it.
pub(crate) type Result<T> = std::result::Result<T, Diagnostic>;
