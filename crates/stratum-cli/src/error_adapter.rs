//! Error adapter for converting Stratum errors and warnings to miette
//! diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Fatal errors go
//! through [`ErrorAdapter`]; the warnings collected while decoding a request
//! go through [`DiagnosticAdapter`], one report per warning.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, Severity as MietteSeverity};

use stratum::{Diagnostic, StratumError};
use stratum_parser::error::Severity;

/// Adapter for a single decode diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter.
    pub fn new(diag: &'a Diagnostic) -> Self {
        Self { diag }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<MietteSeverity> {
        Some(match self.diag.severity() {
            Severity::Error => MietteSeverity::Error,
            Severity::Warning => MietteSeverity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match (self.diag.help(), self.diag.label()) {
            (Some(help), _) => help.to_string(),
            (None, Some(label)) => format!("at byte {}: {}", label.span().start(), label.message()),
            (None, None) => return None,
        };
        Some(Box::new(help))
    }
}

/// Adapter for fatal [`StratumError`]s.
pub struct ErrorAdapter<'a>(pub &'a StratumError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            StratumError::Io(_) => "stratum::io",
            StratumError::Catalog(_) => "stratum::catalog",
            StratumError::Json(_) => "stratum::json",
            StratumError::Format { .. } => "stratum::format",
            StratumError::Persist { .. } => "stratum::persist",
            StratumError::Config(_) => "stratum::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            StratumError::Catalog(_) => "pass the catalog file with --catalog",
            StratumError::Json(_) => {
                "a request is a JSON object with `components` and `edges` arrays"
            }
            StratumError::Format { .. } => {
                "this is a bug in the document writer; the unformatted document was not saved"
            }
            StratumError::Persist { .. } => "check that the output directory is writable",
            StratumError::Config(_) => "see `stratum --help` for the configuration search order",
            StratumError::Io(_) => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error or warning that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A decode warning about one request entry.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A fatal error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<MietteSeverity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }
}

/// Convert a [`StratumError`] into a reportable error.
pub fn to_reportable(err: &StratumError) -> Reportable<'_> {
    Reportable::Error(ErrorAdapter(err))
}

/// Convert decode warnings into one reportable each.
pub fn warnings_to_reportables(diagnostics: &[Diagnostic]) -> Vec<Reportable<'_>> {
    diagnostics
        .iter()
        .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d)))
        .collect()
}

/// Renders a reportable with miette's graphical handler.
pub fn render(reportable: &Reportable<'_>) -> String {
    let mut writer = String::new();
    let reporter = miette::GraphicalReportHandler::new();
    if reporter.render_report(&mut writer, reportable).is_err() {
        return reportable.to_string();
    }
    writer
}

#[cfg(test)]
mod tests {
    use stratum_parser::{Span, error::ErrorCode};

    use super::*;

    #[test]
    fn test_warning_keeps_code_and_severity() {
        let diag = Diagnostic::warning("dropping edge #1: missing target id")
            .with_code(ErrorCode::E202)
            .with_help("set `targetId` to a component id");

        let reportables = warnings_to_reportables(std::slice::from_ref(&diag));

        assert_eq!(reportables.len(), 1);
        let reportable = &reportables[0];
        assert_eq!(reportable.to_string(), "dropping edge #1: missing target id");
        assert_eq!(reportable.code().unwrap().to_string(), "E202");
        assert_eq!(reportable.severity(), Some(MietteSeverity::Warning));
        assert_eq!(
            reportable.help().unwrap().to_string(),
            "set `targetId` to a component id"
        );
    }

    #[test]
    fn test_label_becomes_help_without_help_text() {
        let diag = Diagnostic::warning("dropping component #0: unterminated string")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(7..8), "text ends here");

        let adapter = DiagnosticAdapter::new(&diag);

        assert_eq!(
            adapter.help().unwrap().to_string(),
            "at byte 7: text ends here"
        );
    }

    #[test]
    fn test_error_codes() {
        let err = StratumError::Config("bad".to_string());
        let reportable = to_reportable(&err);

        assert_eq!(reportable.code().unwrap().to_string(), "stratum::config");
        assert_eq!(reportable.to_string(), "Configuration error: bad");
        assert!(render(&reportable).contains("Configuration error: bad"));
    }

    #[test]
    fn test_io_error_has_no_help() {
        let err = StratumError::Io(std::io::Error::other("disk full"));
        assert!(ErrorAdapter(&err).help().is_none());
    }
}
