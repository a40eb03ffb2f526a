//! Shared vocabulary for qualifier discovery: class descriptors, annotation
//! mirrors, validation outcomes, and the traits hosts implement to plug a
//! checker into the loader.

pub mod diagnostics;
pub mod error;
pub mod models;
pub mod resolver;
pub mod support;
pub mod synthesis;

// Re-export commonly used types
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use resolver::ClassResolver;
pub use support::SupportPredicate;
pub use synthesis::{AnnotationSynthesizer, SynthesisError};
