use qualscan_api::{ApiError, SynthesisError};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("API error: {0}")]
    Api(#[from] ApiError),
    #[error("Configuration error: {0}")]
    Config(String),
    /// An archive selected as the qualifier package location could not be
    /// read back during enumeration. There is no fallback strategy.
    #[error("cannot open the archive {}: {source}", path.display())]
    ArchiveUnreadable {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    /// A misconfiguration the user has to fix, e.g. a named external
    /// qualifier that does not exist.
    #[error("{checker}: {message}")]
    UserAbort { checker: String, message: String },
    #[error("cannot synthesize annotation {name}: {source}")]
    SynthesisAbort {
        name: String,
        #[source]
        source: SynthesisError,
    },
}

impl LoaderError {
    /// True for errors caused by user input rather than by the environment.
    pub fn is_user_error(&self) -> bool {
        matches!(self, LoaderError::UserAbort { .. } | LoaderError::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
