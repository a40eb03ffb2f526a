//! The qualifier loader ties the pipeline together:
//! collector → locator → enumerator → validator → registry.
//!
//! Bundled qualifiers are discovered once, while the loader is built.
//! External qualifiers are loaded on demand and returned to the caller
//! without touching the bundled set.

use crate::config::LoaderConfig;
use crate::diagnostics::TracingSink;
use crate::enumerate::{BundledEnumerator, ExternalEnumerator};
use crate::error::{LoaderError, Result};
use crate::locate::{PackageLocation, PackageLocator};
use crate::registry::LoadedQualifierSet;
use crate::search_path::SearchPath;
use crate::validate::{AnnotationValidator, DefaultSynthesizer, SynthesisSucceeded};
use qualscan_api::{
    AnnotationSynthesizer, ClassDescriptor, ClassResolver, DiagnosticSink, QualifierPackage,
    Rejection, SupportPredicate, ValidationOutcome,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Identity of the checker a loader works for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerIdentity {
    name: String,
    namespace: String,
}

impl CheckerIdentity {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }

    /// Splits a fully qualified checker type name, e.g.
    /// `demo.checker.DemoChecker` → name `DemoChecker`, namespace `demo.checker`.
    pub fn from_type_name(type_name: &str) -> Self {
        match type_name.rsplit_once('.') {
            Some((namespace, name)) => Self::new(name, namespace),
            None => Self::new(type_name, ""),
        }
    }

    /// Simple name used to prefix user-facing messages.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

pub struct QualifierLoaderBuilder {
    checker: CheckerIdentity,
    config: LoaderConfig,
    search_path: SearchPath,
    resolver: Option<Arc<dyn ClassResolver>>,
    synthesizer: Option<Arc<dyn AnnotationSynthesizer>>,
    support: Arc<dyn SupportPredicate>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl QualifierLoaderBuilder {
    fn new(checker: CheckerIdentity) -> Self {
        Self {
            checker,
            config: LoaderConfig::default(),
            search_path: SearchPath::new(),
            resolver: None,
            synthesizer: None,
            support: Arc::new(SynthesisSucceeded),
            diagnostics: Arc::new(TracingSink),
        }
    }

    pub fn config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn search_path(mut self, search_path: SearchPath) -> Self {
        self.search_path = search_path;
        self
    }

    /// Required: where class descriptors come from.
    pub fn resolver(mut self, resolver: Arc<dyn ClassResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Defaults to a [`DefaultSynthesizer`] over the resolver.
    pub fn synthesizer(mut self, synthesizer: Arc<dyn AnnotationSynthesizer>) -> Self {
        self.synthesizer = Some(synthesizer);
        self
    }

    /// Defaults to [`SynthesisSucceeded`].
    pub fn support(mut self, support: Arc<dyn SupportPredicate>) -> Self {
        self.support = support;
        self
    }

    /// Defaults to [`TracingSink`].
    pub fn diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Builds the loader and runs bundled discovery.
    pub fn build(self) -> Result<QualifierLoader> {
        self.config.validate()?;
        let resolver = self.resolver.ok_or_else(|| {
            LoaderError::Config("a class resolver is required to build a loader".to_string())
        })?;
        let synthesizer = self
            .synthesizer
            .unwrap_or_else(|| Arc::new(DefaultSynthesizer::new(resolver.clone())));
        let package =
            QualifierPackage::for_namespace(self.checker.namespace(), &self.config.qual_suffix)?;

        let location =
            PackageLocator::new(&package, &self.config.layout, self.diagnostics.as_ref())
                .locate(&self.search_path);

        let validator = AnnotationValidator::new(
            resolver,
            synthesizer,
            self.support,
            self.config.synthesis_failure,
        );

        let mut loader = QualifierLoader {
            checker: self.checker,
            config: self.config,
            package,
            location,
            validator,
            diagnostics: self.diagnostics,
            loaded: LoadedQualifierSet::default(),
        };
        loader.load_bundled()?;
        Ok(loader)
    }
}

pub struct QualifierLoader {
    checker: CheckerIdentity,
    config: LoaderConfig,
    package: QualifierPackage,
    location: Option<PackageLocation>,
    validator: AnnotationValidator,
    diagnostics: Arc<dyn DiagnosticSink>,
    loaded: LoadedQualifierSet,
}

impl std::fmt::Debug for QualifierLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QualifierLoader")
            .field("checker", &self.checker)
            .field("config", &self.config)
            .field("package", &self.package)
            .field("location", &self.location)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}

impl QualifierLoader {
    pub fn builder(checker: CheckerIdentity) -> QualifierLoaderBuilder {
        QualifierLoaderBuilder::new(checker)
    }

    pub fn checker(&self) -> &CheckerIdentity {
        &self.checker
    }

    pub fn package(&self) -> &QualifierPackage {
        &self.package
    }

    /// `None` when no search-path entry holds the qualifier package.
    pub fn location(&self) -> Option<&PackageLocation> {
        self.location.as_ref()
    }

    /// Bundled qualifiers accepted during construction.
    pub fn loaded_qualifiers(&self) -> &LoadedQualifierSet {
        &self.loaded
    }

    fn load_bundled(&mut self) -> Result<()> {
        let names = BundledEnumerator::new(&self.package, &self.config.layout)
            .enumerate(self.location.as_ref())?;

        for simple_name in names {
            let name = self.package.qualify(&simple_name);
            match self.validator.validate(&name, &self.loaded)? {
                ValidationOutcome::Accepted(descriptor) => {
                    self.loaded.insert(descriptor);
                }
                ValidationOutcome::Rejected(reason) => {
                    debug!("Skipping bundled candidate {}: {}", name, reason);
                }
            }
        }

        info!(
            "{}: loaded {} bundled qualifiers from {}",
            self.checker.name(),
            self.loaded.len(),
            self.package
        );
        Ok(())
    }

    /// Loads every acceptable qualifier whose source file lives under `dir`,
    /// at any depth. Candidates that fail validation are skipped.
    pub fn load_external_directory(&self, dir: impl AsRef<Path>) -> Result<LoadedQualifierSet> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(self.user_abort(format!(
                "qualifier directory {} does not exist or is not a directory",
                dir.display()
            )));
        }

        let mut found = LoadedQualifierSet::default();
        let enumerator = ExternalEnumerator::new(&self.config.layout);
        for name in enumerator.candidates(dir) {
            match self.validator.validate(&name, &self.loaded)? {
                ValidationOutcome::Accepted(descriptor) => {
                    found.insert(descriptor);
                }
                ValidationOutcome::Rejected(reason) => {
                    debug!("Skipping external candidate {}: {}", name, reason);
                }
            }
        }

        info!(
            "{}: loaded {} external qualifiers from {:?}",
            self.checker.name(),
            found.len(),
            dir
        );
        Ok(found)
    }

    /// Loads one explicitly named qualifier. Any rejection is a user error,
    /// since the user asked for this class by name.
    pub fn load_external_class(&self, name: &str) -> Result<Arc<ClassDescriptor>> {
        match self.validator.validate(name, &self.loaded)? {
            ValidationOutcome::Accepted(descriptor) => Ok(descriptor),
            ValidationOutcome::Rejected(reason) => {
                let message = match reason {
                    Rejection::NotFound => format!(
                        "could not load class for annotation: {name}; ensure that your classpath is correct"
                    ),
                    Rejection::NotAnnotation => format!(
                        "the loaded class: {name} is not an annotation, ensure it is defined correctly"
                    ),
                    other => format!(
                        "the loaded class: {name} cannot be used as a type qualifier: {other}"
                    ),
                };
                Err(self.user_abort(message))
            }
        }
    }

    fn user_abort(&self, message: String) -> LoaderError {
        self.diagnostics
            .error(&format!("{}: {}", self.checker.name(), message));
        LoaderError::UserAbort {
            checker: self.checker.name().to_string(),
            message,
        }
    }
}
