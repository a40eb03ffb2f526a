use qualscan_api::{Diagnostic, DiagnosticKind, DiagnosticSink};
use std::sync::Mutex;
use tracing::{error, info};

/// Forwards diagnostics to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        match diagnostic.kind {
            DiagnosticKind::Note => info!("{}", diagnostic.message),
            DiagnosticKind::Error => error!("{}", diagnostic.message),
        }
    }
}

/// Keeps diagnostics in memory so a host can render them later.
#[derive(Debug, Default)]
pub struct CollectingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn notes(&self) -> Vec<String> {
        self.messages(DiagnosticKind::Note)
    }

    pub fn errors(&self) -> Vec<String> {
        self.messages(DiagnosticKind::Error)
    }

    fn messages(&self, kind: DiagnosticKind) -> Vec<String> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.kind == kind)
            .map(|d| d.message)
            .collect()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }
}
