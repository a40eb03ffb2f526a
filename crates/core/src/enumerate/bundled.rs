use crate::config::ArtifactLayout;
use crate::error::{LoaderError, Result};
use crate::locate::PackageLocation;
use qualscan_api::QualifierPackage;
use std::collections::BTreeSet;
use std::fs::File;
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;

/// Lists simple names of compiled classes living directly in the qualifier
/// package. Subpackages are never visited.
pub struct BundledEnumerator<'a> {
    package: &'a QualifierPackage,
    layout: &'a ArtifactLayout,
}

impl<'a> BundledEnumerator<'a> {
    pub fn new(package: &'a QualifierPackage, layout: &'a ArtifactLayout) -> Self {
        Self { package, layout }
    }

    pub fn enumerate(&self, location: Option<&PackageLocation>) -> Result<BTreeSet<String>> {
        let names = match location {
            None => BTreeSet::new(),
            Some(PackageLocation::Archive { archive, .. }) => self.from_archive(archive)?,
            Some(PackageLocation::Directory { dir, .. }) => self.from_directory(dir)?,
        };
        debug!(
            "Found {} bundled candidates in {}",
            names.len(),
            self.package
        );
        Ok(names)
    }

    /// The archive was already matched during location, so failing to read
    /// it now is fatal.
    fn from_archive(&self, archive: &Path) -> Result<BTreeSet<String>> {
        let unreadable = |source: zip::result::ZipError| LoaderError::ArchiveUnreadable {
            path: archive.to_path_buf(),
            source,
        };
        let file = File::open(archive).map_err(|e| unreadable(e.into()))?;
        let zip = ZipArchive::new(file).map_err(unreadable)?;

        let prefix = self.package.entry_prefix();
        let names = zip
            .file_names()
            .filter_map(|entry| entry.strip_prefix(prefix.as_str()))
            .filter(|rest| !rest.contains('/'))
            .filter_map(|rest| self.layout.compiled_stem(rest))
            .map(str::to_string)
            .collect();
        Ok(names)
    }

    fn from_directory(&self, dir: &Path) -> Result<BTreeSet<String>> {
        let mut names = BTreeSet::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            // Follows symlinks, unlike `DirEntry::file_type`
            if !entry.path().is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(file_name) = file_name.to_str() else {
                debug!("Skipping non UTF-8 file name {:?}", entry.path());
                continue;
            };
            if let Some(stem) = self.layout.compiled_stem(file_name) {
                names.insert(stem.to_string());
            }
        }
        Ok(names)
    }
}
