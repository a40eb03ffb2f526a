use qualscan_api::{
    AnnotationMirror, AnnotationSynthesizer, ClassDescriptor, ClassResolver, SynthesisError,
};
use std::sync::Arc;

/// Builds a mirror the way an annotation builder would: look the type up in
/// the processing environment and fill every element from its default.
/// Elements without a default cannot be filled, so synthesis fails.
pub struct DefaultSynthesizer {
    environment: Arc<dyn ClassResolver>,
}

impl DefaultSynthesizer {
    pub fn new(environment: Arc<dyn ClassResolver>) -> Self {
        Self { environment }
    }
}

impl AnnotationSynthesizer for DefaultSynthesizer {
    fn synthesize(&self, descriptor: &ClassDescriptor) -> Result<AnnotationMirror, SynthesisError> {
        let element = self
            .environment
            .resolve(descriptor.name())
            .ok_or_else(|| SynthesisError::UnknownType(descriptor.name().to_string()))?;
        if !element.is_annotation() {
            return Err(SynthesisError::NotAnnotation(element.name().to_string()));
        }

        let mut mirror = AnnotationMirror::new(element.name());
        for declared in &element.elements {
            let Some(value) = &declared.default else {
                return Err(SynthesisError::MissingElementValue {
                    annotation: element.name().to_string(),
                    element: declared.name.clone(),
                });
            };
            mirror = mirror.with_value(declared.name.clone(), value.clone());
        }
        Ok(mirror)
    }
}
