use crate::models::{AnnotationMirror, ClassDescriptor};

/// Checker-specific decision on whether a structurally valid qualifier is
/// supported. Runs only after synthesis succeeded.
pub trait SupportPredicate: Send + Sync {
    fn is_supported(&self, descriptor: &ClassDescriptor, mirror: &AnnotationMirror) -> bool;
}

impl<F> SupportPredicate for F
where
    F: Fn(&ClassDescriptor, &AnnotationMirror) -> bool + Send + Sync,
{
    fn is_supported(&self, descriptor: &ClassDescriptor, mirror: &AnnotationMirror) -> bool {
        self(descriptor, mirror)
    }
}
