//! Error types shared by the orchestration core and leaf initializers.

use thiserror::Error;

pub type ContentResult<T> = Result<T, ContentError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("internal error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    /// A specification node without a variant, or one the core cannot handle.
    #[error("malformed initializer spec: {0}")]
    MalformedSpec(String),

    #[error("cancelled: {0}")]
    Cancelled(String),

    #[error("execution error: {0}")]
    Execution(String),
}

impl ContentError {
    /// Whether re-running the whole initialization from scratch may succeed.
    ///
    /// Errors caused by the request itself never go away on retry.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            ContentError::MalformedSpec(_)
                | ContentError::InvalidArgument(_)
                | ContentError::Config(_)
                | ContentError::Unsupported(_)
        )
    }
}

impl From<std::io::Error> for ContentError {
    fn from(err: std::io::Error) -> Self {
        ContentError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ContentError {
    fn from(err: serde_json::Error) -> Self {
        ContentError::Config(err.to_string())
    }
}
