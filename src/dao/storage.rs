use std::error::Error;
use thiserror::Error;

/// Result alias for score store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reported by a score store backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend unreachable or refusing writes.
    #[error("score store unavailable: {message}")]
    Unavailable {
        /// What failed.
        message: String,
        /// Backend error, when there is one.
        #[source]
        source: Option<Box<dyn Error + Send + Sync>>,
    },
}

impl StorageError {
    /// Backend failure with no underlying error to attach.
    pub fn unavailable(message: impl Into<String>) -> Self {
        StorageError::Unavailable {
            message: message.into(),
            source: None,
        }
    }

    /// Backend failure caused by `source`.
    pub fn with_source(
        message: impl Into<String>,
        source: impl Error + Send + Sync + 'static,
    ) -> Self {
        StorageError::Unavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
