use qualscan_core::ArtifactLayout;

pub struct JavaLayout;

impl JavaLayout {
    pub const ARCHIVE_SUFFIX: &'static str = ".jar";
    pub const CLASS_SUFFIX: &'static str = ".class";
    pub const SOURCE_SUFFIX: &'static str = ".java";
    pub const MODULE_SUFFIX: &'static str = ".jmod";

    /// `.jar` archives, `.class` binaries, `.java` sources.
    pub fn artifact_layout() -> ArtifactLayout {
        ArtifactLayout {
            archive_suffixes: vec![Self::ARCHIVE_SUFFIX.to_string()],
            compiled_suffix: Self::CLASS_SUFFIX.to_string(),
            source_suffix: Self::SOURCE_SUFFIX.to_string(),
        }
    }
}
