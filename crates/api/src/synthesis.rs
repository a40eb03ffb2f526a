use crate::models::{AnnotationMirror, ClassDescriptor};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SynthesisError {
    #[error("annotation type {0} is unknown to the processing environment")]
    UnknownType(String),
    #[error("{0} is not an annotation type")]
    NotAnnotation(String),
    #[error("missing value for element '{element}' of {annotation}")]
    MissingElementValue { annotation: String, element: String },
}

/// The annotation-processing environment's ability to build a well-formed
/// instance of an annotation type.
pub trait AnnotationSynthesizer: Send + Sync {
    fn synthesize(&self, descriptor: &ClassDescriptor) -> Result<AnnotationMirror, SynthesisError>;
}
