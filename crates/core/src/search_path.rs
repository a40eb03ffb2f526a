//! Resolution-path collection.
//!
//! The search path is an explicit, ordered sequence supplied by the host:
//! boot entries first, then extension directories, then the class path, then
//! whatever URLs the checker's loader can enumerate. Duplicates collapse onto
//! their first occurrence, so "first match wins" during package location is
//! deterministic.

use crate::config::ArtifactLayout;
use indexmap::IndexSet;
use qualscan_api::DiagnosticSink;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::debug;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PathKind {
    Archive,
    Directory,
}

/// One entry of the search path: an archive file or a directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolutionPath(String);

impl ResolutionPath {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// Archive or directory, decided purely by file-name suffix.
    pub fn kind(&self, layout: &ArtifactLayout) -> PathKind {
        if layout.is_archive(&self.0) {
            PathKind::Archive
        } else {
            PathKind::Directory
        }
    }
}

impl fmt::Display for ResolutionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: IndexSet<ResolutionPath>,
}

impl SearchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry. Returns false if it was already present, in which
    /// case its original position is kept.
    pub fn push(&mut self, path: impl Into<String>) -> bool {
        self.entries.insert(ResolutionPath::new(path))
    }

    pub fn extend_from(&mut self, other: &SearchPath) {
        for entry in other.iter() {
            self.entries.insert(entry.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolutionPath> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SearchPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut path = SearchPath::new();
        for entry in iter {
            path.push(entry);
        }
        path
    }
}

/// Candidate roots supplied by the host build or plugin system. Each string
/// may itself be a list joined with the platform path separator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPathConfig {
    pub boot_path: Vec<String>,
    pub extension_dirs: Vec<String>,
    pub class_path: Vec<String>,
    /// `file:` URLs of the loader that loaded the checker, searched last.
    pub loader_urls: Vec<String>,
}

impl SearchPathConfig {
    pub fn is_empty(&self) -> bool {
        self.boot_path.is_empty()
            && self.extension_dirs.is_empty()
            && self.class_path.is_empty()
            && self.loader_urls.is_empty()
    }
}

/// Capability query for a class loader that may or may not expose the URLs
/// it loads from.
pub trait UrlSource: Send + Sync {
    /// `None` means the loader cannot enumerate its URLs.
    fn enumerable_urls(&self) -> Option<Vec<String>>;
}

/// A loader that does not expose its URLs.
#[derive(Debug, Default, Clone, Copy)]
pub struct OpaqueLoader;

impl UrlSource for OpaqueLoader {
    fn enumerable_urls(&self) -> Option<Vec<String>> {
        None
    }
}

/// A loader with a fixed list of URLs.
#[derive(Debug, Default, Clone)]
pub struct StaticUrls(pub Vec<String>);

impl UrlSource for StaticUrls {
    fn enumerable_urls(&self) -> Option<Vec<String>> {
        Some(self.0.clone())
    }
}

/// Builds the ordered search path from a [`SearchPathConfig`] and the loader
/// URL capabilities.
pub struct SearchPathCollector {
    config: SearchPathConfig,
    checker_urls: Option<Box<dyn UrlSource>>,
    system_urls: Option<Box<dyn UrlSource>>,
}

impl SearchPathCollector {
    /// Configured `loader_urls`, if any, become the checker's URL source.
    pub fn new(config: SearchPathConfig) -> Self {
        let checker_urls = (!config.loader_urls.is_empty())
            .then(|| Box::new(StaticUrls(config.loader_urls.clone())) as Box<dyn UrlSource>);
        Self {
            config,
            checker_urls,
            system_urls: None,
        }
    }

    /// URLs of the loader that loaded the checker. Replaces any configured
    /// `loader_urls`.
    pub fn with_checker_urls(mut self, source: Box<dyn UrlSource>) -> Self {
        self.checker_urls = Some(source);
        self
    }

    /// Fallback used when the checker's loader cannot enumerate its URLs.
    pub fn with_system_urls(mut self, source: Box<dyn UrlSource>) -> Self {
        self.system_urls = Some(source);
        self
    }

    pub fn collect(&self, diagnostics: &dyn DiagnosticSink) -> SearchPath {
        let mut search_path = SearchPath::new();

        let sources = [
            ("boot", &self.config.boot_path),
            ("extension", &self.config.extension_dirs),
            ("class path", &self.config.class_path),
        ];
        for (label, lists) in sources {
            for list in lists {
                for entry in split_path_list(list) {
                    debug!(source = label, path = %entry, "resolution path");
                    search_path.push(entry);
                }
            }
        }

        for url in self.loader_urls() {
            match file_url_to_path(&url) {
                Some(entry) => {
                    debug!(source = "loader", path = %entry, "resolution path");
                    search_path.push(entry);
                }
                None => diagnostics.note(&format!("Loader URL {url} is malformed")),
            }
        }

        debug!("Collected {} resolution paths", search_path.len());
        search_path
    }

    fn loader_urls(&self) -> Vec<String> {
        let from_checker = self
            .checker_urls
            .as_ref()
            .and_then(|source| source.enumerable_urls());
        if let Some(urls) = from_checker {
            return urls;
        }

        debug!("Checker loader does not enumerate URLs, falling back to the system loader");
        self.system_urls
            .as_ref()
            .and_then(|source| source.enumerable_urls())
            .unwrap_or_default()
    }
}

/// Splits a path list on the platform separator, dropping empty segments.
pub fn split_path_list(list: &str) -> Vec<String> {
    std::env::split_paths(list)
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}

fn file_url_to_path(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if url.scheme() != "file" {
        return None;
    }
    let path = url.to_file_path().ok()?;
    Some(path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    fn joined(parts: &[&str]) -> String {
        std::env::join_paths(parts)
            .unwrap()
            .to_string_lossy()
            .into_owned()
    }

    #[test]
    fn test_collect_preserves_source_order_and_dedupes() {
        let config = SearchPathConfig {
            boot_path: vec![joined(&["/jdk/lib/rt.jar", "/jdk/lib/extra.jar"])],
            extension_dirs: vec!["/jdk/lib/ext".to_string()],
            class_path: vec![joined(&["/app/classes", "/jdk/lib/rt.jar", ""])],
            loader_urls: Vec::new(),
        };
        let sink = CollectingSink::new();
        let path = SearchPathCollector::new(config).collect(&sink);

        let entries: Vec<_> = path.iter().map(|p| p.as_str()).collect();
        assert_eq!(
            entries,
            vec![
                "/jdk/lib/rt.jar",
                "/jdk/lib/extra.jar",
                "/jdk/lib/ext",
                "/app/classes"
            ]
        );
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_checker_urls_take_precedence() {
        let sink = CollectingSink::new();
        let path = SearchPathCollector::new(SearchPathConfig::default())
            .with_checker_urls(Box::new(StaticUrls(vec![
                "file:///plugins/checker.jar".to_string(),
            ])))
            .with_system_urls(Box::new(StaticUrls(vec![
                "file:///system/app.jar".to_string(),
            ])))
            .collect(&sink);

        let entries: Vec<_> = path.iter().map(|p| p.as_str()).collect();
        assert_eq!(entries, vec!["/plugins/checker.jar"]);
    }

    #[test]
    fn test_opaque_checker_loader_falls_back_to_system() {
        let sink = CollectingSink::new();
        let path = SearchPathCollector::new(SearchPathConfig::default())
            .with_checker_urls(Box::new(OpaqueLoader))
            .with_system_urls(Box::new(StaticUrls(vec![
                "file:///system/app.jar".to_string(),
            ])))
            .collect(&sink);

        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_no_enumerable_loader_yields_empty() {
        let sink = CollectingSink::new();
        let path = SearchPathCollector::new(SearchPathConfig::default())
            .with_checker_urls(Box::new(OpaqueLoader))
            .with_system_urls(Box::new(OpaqueLoader))
            .collect(&sink);

        assert!(path.is_empty());
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn test_malformed_loader_url_is_noted() {
        let sink = CollectingSink::new();
        let path = SearchPathCollector::new(SearchPathConfig::default())
            .with_checker_urls(Box::new(StaticUrls(vec![
                "not a url".to_string(),
                "http://example.com/remote.jar".to_string(),
                "file:///ok/classes/".to_string(),
            ])))
            .collect(&sink);

        assert_eq!(path.len(), 1);
        assert_eq!(sink.notes().len(), 2);
        assert!(sink.notes()[0].contains("not a url"));
    }

    #[test]
    fn test_configured_loader_urls_follow_class_path() {
        let config = SearchPathConfig {
            class_path: vec!["/app/classes".to_string()],
            loader_urls: vec![
                "file:///plugins/checker.jar".to_string(),
                "file:///app/classes".to_string(),
            ],
            ..SearchPathConfig::default()
        };
        let sink = CollectingSink::new();
        let path = SearchPathCollector::new(config)
            .with_system_urls(Box::new(StaticUrls(vec![
                "file:///system/app.jar".to_string(),
            ])))
            .collect(&sink);

        let entries: Vec<_> = path.iter().map(|p| p.as_str()).collect();
        assert_eq!(entries, vec!["/app/classes", "/plugins/checker.jar"]);
    }

    #[test]
    fn test_kind_by_suffix() {
        let layout = ArtifactLayout::default();
        assert_eq!(
            ResolutionPath::new("/a/b.jar").kind(&layout),
            PathKind::Archive
        );
        assert_eq!(
            ResolutionPath::new("/a/classes").kind(&layout),
            PathKind::Directory
        );
    }
}
