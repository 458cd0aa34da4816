//! Diagnostic sinks.

use std::sync::{Arc, RwLock};

use tracing::{error, info, warn};

use dtogen_core::{
    application::ports::DiagnosticSink,
    domain::{Diagnostic, Severity},
};

/// Forwards diagnostics to `tracing` at the matching level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl TracingDiagnostics {
    pub fn new() -> Self {
        Self
    }
}

impl DiagnosticSink for TracingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        let code = diagnostic.code.id();
        match diagnostic.severity {
            Severity::Error => error!(code, "{}", diagnostic.message),
            Severity::Warning => warn!(code, "{}", diagnostic.message),
            Severity::Info => info!(code, "{}", diagnostic.message),
        }
    }
}

/// Keeps every reported diagnostic; clones share the list.
#[derive(Debug, Clone, Default)]
pub struct CollectingDiagnostics {
    inner: Arc<RwLock<Vec<Diagnostic>>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.inner.read().map(|d| d.clone()).unwrap_or_default()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.inner
            .read()
            .map(|d| d.iter().filter(|x| x.severity == severity).count())
            .unwrap_or(0)
    }

    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

impl DiagnosticSink for CollectingDiagnostics {
    fn report(&self, diagnostic: &Diagnostic) {
        if let Ok(mut list) = self.inner.write() {
            list.push(diagnostic.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_in_report_order() {
        let sink = CollectingDiagnostics::new();
        let shared = sink.clone();
        sink.report(&Diagnostic::unresolvable("App.Ghost"));
        sink.report(&Diagnostic::missing_receiver());

        let codes: Vec<_> = shared.diagnostics().iter().map(|d| d.code.id()).collect();
        assert_eq!(codes, ["DTOGEN002", "DTOGEN001"]);
        assert_eq!(shared.count(Severity::Warning), 1);
        assert!(shared.has_errors());
    }

    #[test]
    fn tracing_sink_accepts_every_severity() {
        let sink = TracingDiagnostics::new();
        sink.report(&Diagnostic::missing_receiver());
        sink.report(&Diagnostic::unresolvable("App.Ghost"));
        sink.report(&Diagnostic::unsupported_conversion("Employee", "Map", "Dictionary<int, Asset>"));
    }
}
