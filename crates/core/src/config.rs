//! Loader configuration.
//!
//! Everything discovery needs to know about naming conventions lives here so
//! that hosts can describe their artifact layout in a JSON file instead of
//! relying on runtime introspection.

use crate::error::{LoaderError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_QUAL_SUFFIX: &str = ".qual";
pub const DEFAULT_ARCHIVE_SUFFIX: &str = ".jar";
pub const DEFAULT_COMPILED_SUFFIX: &str = ".class";
pub const DEFAULT_SOURCE_SUFFIX: &str = ".java";

/// File-name conventions for archives, compiled artifacts and sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactLayout {
    pub archive_suffixes: Vec<String>,
    pub compiled_suffix: String,
    pub source_suffix: String,
}

impl Default for ArtifactLayout {
    fn default() -> Self {
        Self {
            archive_suffixes: vec![DEFAULT_ARCHIVE_SUFFIX.to_string()],
            compiled_suffix: DEFAULT_COMPILED_SUFFIX.to_string(),
            source_suffix: DEFAULT_SOURCE_SUFFIX.to_string(),
        }
    }
}

impl ArtifactLayout {
    pub fn is_archive(&self, path: &str) -> bool {
        self.archive_suffixes
            .iter()
            .any(|suffix| path.ends_with(suffix.as_str()))
    }

    /// Simple class name of a compiled artifact file name, if it is one.
    pub fn compiled_stem<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.compiled_suffix.as_str())
            .filter(|stem| !stem.is_empty())
    }

    /// Class name of a source file name, if it is one.
    pub fn source_stem<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        file_name
            .strip_suffix(self.source_suffix.as_str())
            .filter(|stem| !stem.is_empty())
    }

    fn validate(&self) -> Result<()> {
        let suffixes = self
            .archive_suffixes
            .iter()
            .chain([&self.compiled_suffix, &self.source_suffix]);
        for suffix in suffixes {
            if suffix.len() < 2 || !suffix.starts_with('.') {
                return Err(LoaderError::Config(format!(
                    "suffix '{suffix}' must start with '.' and name an extension"
                )));
            }
        }
        Ok(())
    }
}

/// What to do when an otherwise well-shaped annotation cannot be synthesized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisFailurePolicy {
    /// Stop the whole discovery pass.
    #[default]
    Abort,
    /// Drop the candidate and keep going.
    Skip,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Appended to the checker namespace to name the qualifier package.
    pub qual_suffix: String,
    pub layout: ArtifactLayout,
    pub synthesis_failure: SynthesisFailurePolicy,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            qual_suffix: DEFAULT_QUAL_SUFFIX.to_string(),
            layout: ArtifactLayout::default(),
            synthesis_failure: SynthesisFailurePolicy::default(),
        }
    }
}

impl LoaderConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: LoaderConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_synthesis_failure(mut self, policy: SynthesisFailurePolicy) -> Self {
        self.synthesis_failure = policy;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.qual_suffix.trim_start_matches('.').is_empty() {
            return Err(LoaderError::Config(
                "qualifier package suffix must not be empty".to_string(),
            ));
        }
        self.layout.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_follow_jvm_layout() {
        let config = LoaderConfig::default();
        assert_eq!(config.qual_suffix, ".qual");
        assert!(config.layout.is_archive("/opt/lib/checker.jar"));
        assert!(!config.layout.is_archive("/opt/lib/classes"));
        assert_eq!(config.layout.compiled_stem("A.class"), Some("A"));
        assert_eq!(config.layout.compiled_stem(".class"), None);
        assert_eq!(config.layout.source_stem("MyQual.java"), Some("MyQual"));
        assert_eq!(config.synthesis_failure, SynthesisFailurePolicy::Abort);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"synthesis_failure": "skip"}}"#).unwrap();

        let config = LoaderConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.synthesis_failure, SynthesisFailurePolicy::Skip);
        assert_eq!(config.layout, ArtifactLayout::default());
    }

    #[test]
    fn test_rejects_bad_suffix() {
        let mut config = LoaderConfig::default();
        config.layout.compiled_suffix = "class".to_string();
        assert!(matches!(config.validate(), Err(LoaderError::Config(_))));

        let mut config = LoaderConfig::default();
        config.qual_suffix = ".".to_string();
        assert!(config.validate().is_err());
    }
}
