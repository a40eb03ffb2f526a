use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    Note,
    Error,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn note(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Note,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::Error,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            DiagnosticKind::Note => write!(f, "note: {}", self.message),
            DiagnosticKind::Error => write!(f, "error: {}", self.message),
        }
    }
}

/// Where user-visible notes and errors go. Passed explicitly to each
/// component instead of being reached through ambient state.
pub trait DiagnosticSink: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);

    fn note(&self, message: &str) {
        self.report(Diagnostic::note(message));
    }

    fn error(&self, message: &str) {
        self.report(Diagnostic::error(message));
    }
}
