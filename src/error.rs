use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibrisError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LibrisError {
    /// True for failures caused by the request itself rather than by the
    /// backing storage. These are reported to the user and never abort the
    /// session loop.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            LibrisError::Validation(_) | LibrisError::NotFound(_) | LibrisError::Conflict(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LibrisError>;
