//! Annotation validation.
//!
//! A candidate name is accepted only if it resolves to an annotation type,
//! its `@Target` is restricted to type-use contexts, a mirror can be
//! synthesized for it, and the checker's support predicate agrees.

pub mod support;
pub mod synthesis;

pub use support::{RequiresMetaAnnotation, SynthesisSucceeded};
pub use synthesis::DefaultSynthesizer;

use crate::config::SynthesisFailurePolicy;
use crate::error::{LoaderError, Result};
use crate::registry::LoadedQualifierSet;
use qualscan_api::{
    AnnotationSynthesizer, ClassDescriptor, ClassResolver, Rejection, SupportPredicate,
    ValidationOutcome, has_type_qualifier_element_types,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct AnnotationValidator {
    resolver: Arc<dyn ClassResolver>,
    synthesizer: Arc<dyn AnnotationSynthesizer>,
    support: Arc<dyn SupportPredicate>,
    policy: SynthesisFailurePolicy,
}

impl AnnotationValidator {
    pub fn new(
        resolver: Arc<dyn ClassResolver>,
        synthesizer: Arc<dyn AnnotationSynthesizer>,
        support: Arc<dyn SupportPredicate>,
        policy: SynthesisFailurePolicy,
    ) -> Self {
        Self {
            resolver,
            synthesizer,
            support,
            policy,
        }
    }

    /// Runs the full contract for one candidate. Names already in `accepted`
    /// skip synthesis and the support check.
    ///
    /// Only a synthesis failure under [`SynthesisFailurePolicy::Abort`]
    /// produces an `Err`; everything else is a rejection.
    pub fn validate(&self, name: &str, accepted: &LoadedQualifierSet) -> Result<ValidationOutcome> {
        let descriptor = match self.check_shape(name) {
            Ok(descriptor) => descriptor,
            Err(reason) => return Ok(ValidationOutcome::Rejected(reason)),
        };

        if accepted.contains(descriptor.name()) {
            return Ok(ValidationOutcome::Accepted(descriptor));
        }

        let mirror = match self.synthesizer.synthesize(&descriptor) {
            Ok(mirror) => mirror,
            Err(source) => match self.policy {
                SynthesisFailurePolicy::Abort => {
                    return Err(LoaderError::SynthesisAbort {
                        name: name.to_string(),
                        source,
                    });
                }
                SynthesisFailurePolicy::Skip => {
                    warn!("Skipping {}: {}", name, source);
                    return Ok(ValidationOutcome::Rejected(Rejection::SynthesisFailed(
                        source.to_string(),
                    )));
                }
            },
        };

        if !self.support.is_supported(&descriptor, &mirror) {
            return Ok(ValidationOutcome::Rejected(Rejection::Unsupported));
        }
        debug!("Accepted qualifier {}", mirror);
        Ok(ValidationOutcome::Accepted(descriptor))
    }

    /// Resolution plus structural checks: annotation kind and a type-use
    /// `@Target`.
    pub fn check_shape(&self, name: &str) -> std::result::Result<Arc<ClassDescriptor>, Rejection> {
        let descriptor = self.resolver.resolve(name).ok_or(Rejection::NotFound)?;
        if !descriptor.is_annotation() {
            return Err(Rejection::NotAnnotation);
        }
        let targets = descriptor.target.as_ref().ok_or(Rejection::MissingTarget)?;
        if !has_type_qualifier_element_types(targets) {
            return Err(Rejection::NotTypeUse(targets.clone()));
        }
        Ok(descriptor)
    }
}
