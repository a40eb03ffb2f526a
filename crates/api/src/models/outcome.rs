use crate::models::descriptor::{ClassDescriptor, ElementType};
use std::sync::Arc;

/// Why a candidate did not make it into a qualifier set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("class not found")]
    NotFound,
    #[error("not an annotation type")]
    NotAnnotation,
    #[error("no @Target meta-annotation")]
    MissingTarget,
    #[error("@Target {0:?} is not restricted to type-use contexts")]
    NotTypeUse(Vec<ElementType>),
    #[error("structural synthesis failed: {0}")]
    SynthesisFailed(String),
    #[error("not supported by the checker")]
    Unsupported,
}

#[derive(Debug, Clone)]
pub enum ValidationOutcome {
    Accepted(Arc<ClassDescriptor>),
    Rejected(Rejection),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }

    pub fn accepted(self) -> Option<Arc<ClassDescriptor>> {
        match self {
            ValidationOutcome::Accepted(descriptor) => Some(descriptor),
            ValidationOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            ValidationOutcome::Accepted(_) => None,
            ValidationOutcome::Rejected(reason) => Some(reason),
        }
    }
}
