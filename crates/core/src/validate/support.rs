use qualscan_api::{AnnotationMirror, ClassDescriptor, SupportPredicate};

/// Accepts every qualifier whose mirror could be built.
#[derive(Debug, Default, Clone, Copy)]
pub struct SynthesisSucceeded;

impl SupportPredicate for SynthesisSucceeded {
    fn is_supported(&self, _descriptor: &ClassDescriptor, _mirror: &AnnotationMirror) -> bool {
        true
    }
}

/// Accepts only qualifiers carrying a given meta-annotation, e.g. a units
/// checker that ignores annotations not marked as unit definitions.
#[derive(Debug, Clone)]
pub struct RequiresMetaAnnotation {
    meta_annotation: String,
}

impl RequiresMetaAnnotation {
    pub fn new(meta_annotation: impl Into<String>) -> Self {
        Self {
            meta_annotation: meta_annotation.into(),
        }
    }
}

impl SupportPredicate for RequiresMetaAnnotation {
    fn is_supported(&self, descriptor: &ClassDescriptor, _mirror: &AnnotationMirror) -> bool {
        descriptor.has_meta_annotation(&self.meta_annotation)
    }
}
