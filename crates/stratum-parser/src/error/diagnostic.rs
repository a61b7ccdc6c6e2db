//! The core diagnostic type.
//!
//! A [`Diagnostic`] represents a single error or warning with an optional
//! error code, an optional labeled span into the raw payload text, and help
//! text.

use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// A diagnostic message about one request entry.
///
/// # Example
///
/// ```
/// # use stratum_parser::{Span, error::{Diagnostic, ErrorCode}};
/// let diag = Diagnostic::error("expected ':' after dictionary key")
///     .with_code(ErrorCode::E100)
///     .with_label(Span::new(5..6), "found `,`")
///     .with_help("dictionary entries are written `'key': value`");
///
/// assert_eq!(diag.to_string(), "error[E100]: expected ':' after dictionary key");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    label: Option<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Get the severity of this diagnostic.
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Get the error code, if any.
    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    /// Get the primary message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the label, if any.
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Get the help text, if any.
    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Set the error code.
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Attach a labeled span.
    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.label = Some(Label::new(span, message));
        self
    }

    /// Set the help text.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Downgrades the diagnostic to a warning and prefixes its message with
    /// `context`, keeping the code, label and help.
    pub fn into_warning(mut self, context: impl fmt::Display) -> Self {
        self.severity = Severity::Warning;
        self.message = format!("{context}: {}", self.message);
        self
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            label: None,
            help: None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "error[E001]: message" or "error: message"
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}
