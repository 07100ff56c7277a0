use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DomainError {
    /// The backend rejected the current token. Every caller must force a logout.
    #[error("Session expired")]
    SessionExpired,

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn is_session_expired(&self) -> bool {
        matches!(self, DomainError::SessionExpired)
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        DomainError::ApiError {
            status,
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(error: rusqlite::Error) -> Self {
        DomainError::StorageError(format!("Database error: {}", error))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(error: serde_json::Error) -> Self {
        DomainError::InternalError(format!("JSON error: {}", error))
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            DomainError::InternalError(format!("Failed to decode response: {}", error))
        } else {
            DomainError::NetworkError(error.to_string())
        }
    }
}

impl From<std::io::Error> for DomainError {
    fn from(error: std::io::Error) -> Self {
        DomainError::StorageError(format!("IO error: {}", error))
    }
}
