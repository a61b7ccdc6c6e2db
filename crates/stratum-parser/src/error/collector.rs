//! Collector for accumulating diagnostics while decoding a request.

use log::warn;

use crate::error::Diagnostic;

/// Accumulates diagnostics so one bad entry never stops the rest of the
/// request from decoding.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticCollector {
    /// Create a new empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a diagnostic to this collector. Every emitted diagnostic is also
    /// logged as a warning.
    pub fn emit(&mut self, diagnostic: Diagnostic) {
        warn!(code:? = diagnostic.code(); "{}", diagnostic.message());
        self.diagnostics.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Finish collection, returning everything emitted in order.
    pub fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
