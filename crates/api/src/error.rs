#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
