use thiserror::Error;

/// Domain-level errors for the weighing workflow
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Connectivity failures are the only retryable category. Everything else
    /// is terminal for the action that caused it.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Connectivity(_))
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
