use crate::config::ArtifactLayout;
use std::path::{Component, Path};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Walks a user-supplied qualifier directory and derives a fully qualified
/// candidate name for every source file in it.
///
/// The directory structure must mirror the package structure:
/// `<root>/sub/pkg/MyQual.java` yields `sub.pkg.MyQual`.
pub struct ExternalEnumerator<'a> {
    layout: &'a ArtifactLayout,
}

impl<'a> ExternalEnumerator<'a> {
    pub fn new(layout: &'a ArtifactLayout) -> Self {
        Self { layout }
    }

    /// Lazily yields candidate names, so callers can validate each one
    /// before the walk moves on. Symlinked files and directories are
    /// followed.
    pub fn candidates<'b>(&'b self, root: &'b Path) -> impl Iterator<Item = String> + 'b {
        WalkDir::new(root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!("Skipping unreadable entry under {:?}: {}", root, e);
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(move |entry| self.candidate_name(root, entry.path()))
    }

    /// `<relative-path-dots>.<file-base-name>`, or just the base name for
    /// files directly in the root.
    pub fn candidate_name(&self, root: &Path, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(root).ok()?;
        let file_name = relative.file_name()?.to_str()?;
        let stem = self.layout.source_stem(file_name)?;

        let mut segments = Vec::new();
        if let Some(parent) = relative.parent() {
            for component in parent.components() {
                match component {
                    Component::Normal(segment) => segments.push(segment.to_str()?),
                    _ => {
                        debug!("Unexpected path component in {:?}", relative);
                        return None;
                    }
                }
            }
        }
        segments.push(stem);
        Some(segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_candidate_name_from_relative_path() {
        let layout = ArtifactLayout::default();
        let enumerator = ExternalEnumerator::new(&layout);
        let root = Path::new("/quals");

        assert_eq!(
            enumerator.candidate_name(root, &root.join("sub/pkg/MyQual.java")),
            Some("sub.pkg.MyQual".to_string())
        );
        assert_eq!(
            enumerator.candidate_name(root, &root.join("Top.java")),
            Some("Top".to_string())
        );
        assert_eq!(
            enumerator.candidate_name(root, &root.join("sub/MyQual.class")),
            None
        );
        assert_eq!(
            enumerator.candidate_name(Path::new("/elsewhere"), &root.join("A.java")),
            None
        );
    }

    #[test]
    fn test_candidates_walk_all_depths() {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("sub/pkg")).unwrap();
        fs::create_dir_all(root.join("other")).unwrap();
        fs::write(root.join("Top.java"), b"").unwrap();
        fs::write(root.join("sub/pkg/MyQual.java"), b"").unwrap();
        fs::write(root.join("sub/pkg/MyQual.class"), b"").unwrap();
        fs::write(root.join("other/notes.txt"), b"").unwrap();

        let layout = ArtifactLayout::default();
        let enumerator = ExternalEnumerator::new(&layout);
        let names: Vec<String> = enumerator.candidates(root).collect();

        assert_eq!(names, vec!["Top", "sub.pkg.MyQual"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_candidates_follow_symlinks() {
        use std::os::unix::fs::symlink;

        let temp = tempfile::tempdir().unwrap();
        let real = temp.path().join("real");
        let root = temp.path().join("quals");
        fs::create_dir_all(real.join("pkg")).unwrap();
        fs::create_dir_all(&root).unwrap();
        fs::write(real.join("pkg/MyQual.java"), b"").unwrap();
        fs::write(real.join("Linked.java"), b"").unwrap();
        symlink(&real, root.join("sub")).unwrap();
        symlink(real.join("Linked.java"), root.join("Top.java")).unwrap();

        let layout = ArtifactLayout::default();
        let enumerator = ExternalEnumerator::new(&layout);
        let names: Vec<String> = enumerator.candidates(&root).collect();

        assert_eq!(names, vec!["Top", "sub.Linked", "sub.pkg.MyQual"]);
    }
}
