use crate::error::{ApiError, ApiResult};
use crate::models::descriptor::is_qualified_name;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The package holding a checker's bundled qualifiers, kept in the three
/// shapes discovery needs: dotted (`demo.checker.qual`), slashed
/// (`demo/checker/qual`) and as ordered segments for directory descent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifierPackage {
    dotted: String,
    slashed: String,
    segments: Vec<String>,
}

impl QualifierPackage {
    pub fn new(dotted: impl Into<String>) -> ApiResult<Self> {
        let dotted = dotted.into();
        if !is_qualified_name(&dotted) {
            return Err(ApiError::InvalidArgument(format!(
                "'{dotted}' is not a valid package name"
            )));
        }
        let slashed = dotted.replace('.', "/");
        let segments = dotted.split('.').map(str::to_string).collect();
        Ok(Self {
            dotted,
            slashed,
            segments,
        })
    }

    /// Derives the qualifier package of a checker from its namespace and a
    /// fixed suffix such as `.qual`.
    pub fn for_namespace(namespace: &str, suffix: &str) -> ApiResult<Self> {
        let suffix = suffix.trim_start_matches('.');
        if namespace.is_empty() {
            Self::new(suffix)
        } else {
            Self::new(format!("{namespace}.{suffix}"))
        }
    }

    pub fn dotted(&self) -> &str {
        &self.dotted
    }

    pub fn slashed(&self) -> &str {
        &self.slashed
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Archive entry prefix for members of this package (`demo/checker/qual/`).
    pub fn entry_prefix(&self) -> String {
        format!("{}/", self.slashed)
    }

    /// Fully qualified name of a class living directly in this package.
    pub fn qualify(&self, simple_name: &str) -> String {
        format!("{}.{}", self.dotted, simple_name)
    }
}

impl fmt::Display for QualifierPackage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted)
    }
}
