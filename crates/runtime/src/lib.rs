use qualscan_api::DiagnosticSink;
use qualscan_core::{CheckerIdentity, LoaderConfig, QualifierLoader, Result, TracingSink};
use qualscan_java::{JavaLayout, JvmEnvironment, load_registry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// What a host knows about the checker it is loading qualifiers for.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Fully qualified checker type name, e.g. `demo.checker.DemoChecker`.
    pub checker: String,
    /// Descriptor manifests, applied in order.
    pub manifests: Vec<PathBuf>,
    /// Class path entries searched after the environment's own.
    pub class_path: Vec<String>,
    /// `file:` URLs of the loader hosting the checker, searched last.
    pub loader_urls: Vec<String>,
    /// Optional JSON loader configuration.
    pub config_file: Option<PathBuf>,
}

impl LoaderOptions {
    pub fn new(checker: impl Into<String>) -> Self {
        Self {
            checker: checker.into(),
            manifests: Vec::new(),
            class_path: Vec::new(),
            loader_urls: Vec::new(),
            config_file: None,
        }
    }
}

/// Bootstraps a qualifier loader with JVM conventions: JDK boot path,
/// environment class path, manifest-backed descriptors.
///
/// Bundled discovery runs before this returns.
pub fn build_default_loader(options: LoaderOptions) -> Result<QualifierLoader> {
    build_loader(options, JvmEnvironment::from_env(), Arc::new(TracingSink))
}

/// Same as [`build_default_loader`] with an explicit environment and sink.
pub fn build_loader(
    options: LoaderOptions,
    environment: JvmEnvironment,
    diagnostics: Arc<dyn DiagnosticSink>,
) -> Result<QualifierLoader> {
    let config = match &options.config_file {
        Some(path) => LoaderConfig::from_json_file(path)?,
        None => LoaderConfig {
            layout: JavaLayout::artifact_layout(),
            ..LoaderConfig::default()
        },
    };

    let resolver = Arc::new(load_registry(options.manifests.as_slice())?);
    let search_path = environment
        .with_class_path(options.class_path)
        .with_loader_urls(options.loader_urls)
        .collector()
        .collect(diagnostics.as_ref());
    debug!(
        "Search path for {} has {} entries",
        options.checker,
        search_path.len()
    );

    QualifierLoader::builder(CheckerIdentity::from_type_name(&options.checker))
        .config(config)
        .search_path(search_path)
        .resolver(resolver)
        .diagnostics(diagnostics)
        .build()
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str, to_stderr: bool) -> Option<impl Drop> {
    Some(qualscan_core::logging::init_logging(component, to_stderr))
}

#[cfg(test)]
mod tests {
    use super::*;
    use qualscan_core::CollectingSink;
    use std::fs;
    use url::Url;

    #[test]
    fn test_build_loader_from_directory_class_path() {
        let temp = tempfile::tempdir().unwrap();
        let classes = temp.path().join("classes");
        fs::create_dir_all(classes.join("demo/checker/qual")).unwrap();
        fs::write(classes.join("demo/checker/qual/Tainted.class"), b"").unwrap();

        let manifest = temp.path().join("qualifiers.json");
        fs::write(
            &manifest,
            r#"{"descriptors": [{"name": "demo.checker.qual.Tainted", "kind": "annotation", "target": ["TYPE_USE"]}]}"#,
        )
        .unwrap();

        let mut options = LoaderOptions::new("demo.checker.DemoChecker");
        options.manifests.push(manifest);
        options.class_path.push(classes.to_string_lossy().to_string());

        let loader = build_loader(
            options,
            JvmEnvironment::default(),
            Arc::new(CollectingSink::new()),
        )
        .unwrap();

        assert!(loader.loaded_qualifiers().contains("demo.checker.qual.Tainted"));
    }

    #[test]
    fn test_build_loader_searches_loader_urls() {
        let temp = tempfile::tempdir().unwrap();
        let plugin = temp.path().join("plugin");
        fs::create_dir_all(plugin.join("demo/checker/qual")).unwrap();
        fs::write(plugin.join("demo/checker/qual/Tainted.class"), b"").unwrap();

        let manifest = temp.path().join("qualifiers.json");
        fs::write(
            &manifest,
            r#"{"descriptors": [{"name": "demo.checker.qual.Tainted", "kind": "annotation", "target": ["TYPE_USE"]}]}"#,
        )
        .unwrap();

        let mut options = LoaderOptions::new("demo.checker.DemoChecker");
        options.manifests.push(manifest);
        options
            .loader_urls
            .push(Url::from_directory_path(&plugin).unwrap().to_string());

        let loader = build_loader(
            options,
            JvmEnvironment::default(),
            Arc::new(CollectingSink::new()),
        )
        .unwrap();

        assert!(loader.location().unwrap().path().starts_with(&plugin));
        assert!(loader.loaded_qualifiers().contains("demo.checker.qual.Tainted"));
    }

    #[test]
    fn test_missing_config_file_fails() {
        let mut options = LoaderOptions::new("demo.checker.DemoChecker");
        options.config_file = Some(PathBuf::from("/nonexistent/qualscan.json"));

        let result = build_loader(
            options,
            JvmEnvironment::default(),
            Arc::new(CollectingSink::new()),
        );
        assert!(result.is_err());
    }
}
