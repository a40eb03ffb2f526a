//! Package location: finds the first search-path entry that contains the
//! qualifier package.

use crate::config::ArtifactLayout;
use crate::search_path::{PathKind, ResolutionPath, SearchPath};
use qualscan_api::{DiagnosticSink, QualifierPackage};
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;
use zip::ZipArchive;

/// Where a checker's bundled qualifiers live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageLocation {
    /// The archive containing the package; `url` has the `jar:file:…!/` form.
    Archive { archive: PathBuf, url: Url },
    /// The package directory itself (not the search-path root).
    Directory { dir: PathBuf, url: Url },
}

impl PackageLocation {
    pub fn url(&self) -> &Url {
        match self {
            PackageLocation::Archive { url, .. } | PackageLocation::Directory { url, .. } => url,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            PackageLocation::Archive { archive, .. } => archive,
            PackageLocation::Directory { dir, .. } => dir,
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, PackageLocation::Archive { .. })
    }
}

pub struct PackageLocator<'a> {
    package: &'a QualifierPackage,
    layout: &'a ArtifactLayout,
    diagnostics: &'a dyn DiagnosticSink,
}

impl<'a> PackageLocator<'a> {
    pub fn new(
        package: &'a QualifierPackage,
        layout: &'a ArtifactLayout,
        diagnostics: &'a dyn DiagnosticSink,
    ) -> Self {
        Self {
            package,
            layout,
            diagnostics,
        }
    }

    /// Walks the search path in order and stops at the first entry holding
    /// the package. Returns `None` when no entry does.
    pub fn locate(&self, search_path: &SearchPath) -> Option<PackageLocation> {
        for entry in search_path.iter() {
            let found = match entry.kind(self.layout) {
                PathKind::Archive => self.locate_in_archive(entry),
                PathKind::Directory => self.locate_in_directory(entry),
            };
            if let Some(location) = found {
                debug!("Qualifier package {} found at {}", self.package, location.url());
                return Some(location);
            }
        }
        debug!("Qualifier package {} not found on the search path", self.package);
        None
    }

    fn locate_in_archive(&self, entry: &ResolutionPath) -> Option<PackageLocation> {
        let Some((archive, url)) = archive_url(entry.as_path()) else {
            self.diagnostics
                .note(&format!("Jar URL {entry} is malformed"));
            return None;
        };
        if !self.archive_contains_package(&archive) {
            return None;
        }
        Some(PackageLocation::Archive { archive, url })
    }

    fn locate_in_directory(&self, entry: &ResolutionPath) -> Option<PackageLocation> {
        let Some(root) = absolute_file_path(entry.as_path()) else {
            self.diagnostics
                .note(&format!("Directory URL {entry} is malformed"));
            return None;
        };
        let dir = self.descend(&root)?;
        let Ok(url) = Url::from_directory_path(&dir) else {
            self.diagnostics
                .note(&format!("Directory URL {} is malformed", dir.display()));
            return None;
        };
        Some(PackageLocation::Directory { dir, url })
    }

    /// An archive holds the package when any entry lives under its prefix.
    /// Archives that cannot be opened simply do not match.
    fn archive_contains_package(&self, archive: &Path) -> bool {
        let file = match File::open(archive) {
            Ok(file) => file,
            Err(e) => {
                debug!("Skipping unreadable archive {:?}: {}", archive, e);
                return false;
            }
        };
        let zip = match ZipArchive::new(file) {
            Ok(zip) => zip,
            Err(e) => {
                debug!("Skipping invalid archive {:?}: {}", archive, e);
                return false;
            }
        };
        let prefix = self.package.entry_prefix();
        zip.file_names().any(|name| name.starts_with(&prefix))
    }

    /// Descends one package segment at a time, requiring a directory with
    /// exactly that name at each level.
    fn descend(&self, root: &Path) -> Option<PathBuf> {
        if !root.is_dir() {
            return None;
        }
        let mut current = root.to_path_buf();
        for segment in self.package.segments() {
            current = child_directory(&current, segment)?;
        }
        Some(current)
    }
}

fn child_directory(dir: &Path, name: &str) -> Option<PathBuf> {
    let entries = std::fs::read_dir(dir).ok()?;
    entries
        .flatten()
        .find(|entry| entry.file_name() == name && entry.path().is_dir())
        .map(|entry| entry.path())
}

fn absolute_file_path(path: &Path) -> Option<PathBuf> {
    let absolute = std::path::absolute(path).ok()?;
    Url::from_file_path(&absolute).ok()?;
    Some(absolute)
}

fn archive_url(path: &Path) -> Option<(PathBuf, Url)> {
    let absolute = std::path::absolute(path).ok()?;
    let file_url = Url::from_file_path(&absolute).ok()?;
    let url = Url::parse(&format!("jar:{file_url}!/")).ok()?;
    Some((absolute, url))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use std::fs;
    use std::io::Write;

    fn package() -> QualifierPackage {
        QualifierPackage::new("demo.checker.qual").unwrap()
    }

    fn create_jar(path: &Path, entries: &[&str]) {
        let file = File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default();
        for entry in entries {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(&[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_locate_directory() {
        let temp = tempfile::tempdir().unwrap();
        let qual = temp.path().join("demo/checker/qual");
        fs::create_dir_all(&qual).unwrap();

        let package = package();
        let layout = ArtifactLayout::default();
        let sink = CollectingSink::new();
        let search_path: SearchPath = [temp.path().to_string_lossy().into_owned()]
            .into_iter()
            .collect();

        let location = PackageLocator::new(&package, &layout, &sink)
            .locate(&search_path)
            .unwrap();

        assert!(!location.is_archive());
        assert_eq!(location.path(), qual.as_path());
        assert_eq!(location.url().scheme(), "file");
        assert!(location.url().as_str().ends_with("demo/checker/qual/"));
    }

    #[test]
    fn test_missing_segment_fails() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("demo/checker")).unwrap();
        // A file named like the last segment is not a package directory
        fs::File::create(temp.path().join("demo/checker/qual")).unwrap();

        let package = package();
        let layout = ArtifactLayout::default();
        let sink = CollectingSink::new();
        let search_path: SearchPath = [temp.path().to_string_lossy().into_owned()]
            .into_iter()
            .collect();

        assert!(
            PackageLocator::new(&package, &layout, &sink)
                .locate(&search_path)
                .is_none()
        );
    }

    #[test]
    fn test_locate_archive() {
        let temp = tempfile::tempdir().unwrap();
        let jar = temp.path().join("checker.jar");
        create_jar(&jar, &["demo/checker/qual/A.class", "demo/checker/Main.class"]);

        let package = package();
        let layout = ArtifactLayout::default();
        let sink = CollectingSink::new();
        let search_path: SearchPath = [jar.to_string_lossy().into_owned()].into_iter().collect();

        let location = PackageLocator::new(&package, &layout, &sink)
            .locate(&search_path)
            .unwrap();

        assert!(location.is_archive());
        assert_eq!(location.path(), jar.as_path());
        assert_eq!(location.url().scheme(), "jar");
        assert!(location.url().as_str().ends_with("checker.jar!/"));
    }

    #[test]
    fn test_archive_prefix_respects_segment_boundary() {
        let temp = tempfile::tempdir().unwrap();
        let jar = temp.path().join("other.jar");
        create_jar(&jar, &["demo/checker/qualifiers/A.class"]);

        let package = package();
        let layout = ArtifactLayout::default();
        let sink = CollectingSink::new();
        let search_path: SearchPath = [jar.to_string_lossy().into_owned()].into_iter().collect();

        assert!(
            PackageLocator::new(&package, &layout, &sink)
                .locate(&search_path)
                .is_none()
        );
    }

    #[test]
    fn test_first_match_wins() {
        let temp = tempfile::tempdir().unwrap();
        let first = temp.path().join("first");
        let second = temp.path().join("second");
        fs::create_dir_all(first.join("demo/checker/qual")).unwrap();
        fs::create_dir_all(second.join("demo/checker/qual")).unwrap();
        let broken = temp.path().join("broken.jar");
        fs::write(&broken, b"not a zip").unwrap();

        let package = package();
        let layout = ArtifactLayout::default();
        let sink = CollectingSink::new();
        let search_path: SearchPath = [
            broken.to_string_lossy().into_owned(),
            temp.path().join("missing").to_string_lossy().into_owned(),
            second.to_string_lossy().into_owned(),
            first.to_string_lossy().into_owned(),
        ]
        .into_iter()
        .collect();

        let location = PackageLocator::new(&package, &layout, &sink)
            .locate(&search_path)
            .unwrap();
        assert!(location.path().starts_with(&second));
    }

    #[test]
    fn test_malformed_entry_is_noted_and_skipped() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir_all(temp.path().join("demo/checker/qual")).unwrap();

        let package = package();
        let layout = ArtifactLayout::default();
        let sink = CollectingSink::new();
        let search_path: SearchPath = [String::new(), temp.path().to_string_lossy().into_owned()]
            .into_iter()
            .collect();

        let location = PackageLocator::new(&package, &layout, &sink).locate(&search_path);
        assert!(location.is_some());
        assert_eq!(sink.notes().len(), 1);
        assert!(sink.notes()[0].starts_with("Directory URL"));
    }
}
