use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// Error shape handed to the UI layer.
///
/// `redirect_to_login` is set only for an expired session; the caller is
/// expected to route back to the login screen when it sees it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorNotice {
    pub code: String,
    pub message: String,
    pub details: Vec<String>,
    #[serde(default)]
    pub redirect_to_login: bool,
}

impl ErrorNotice {
    pub fn new(code: &str, message: &str, details: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details,
            redirect_to_login: false,
        }
    }

}

impl From<DomainError> for ErrorNotice {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::SessionExpired => Self {
                redirect_to_login: true,
                ..Self::new(
                    "SESSION_EXPIRED",
                    "Your session has expired. Please log in again.",
                    vec![],
                )
            },
            DomainError::ApiError { status, message } => {
                Self::new("API_ERROR", &message, vec![format!("status: {}", status)])
            }
            DomainError::NetworkError(msg) => Self::new("NETWORK_ERROR", &msg, vec![]),
            DomainError::ValidationError(msg) => Self::new("VALIDATION_ERROR", &msg, vec![]),
            DomainError::StorageError(msg) | DomainError::InternalError(msg) => {
                Self::new("INTERNAL_ERROR", &msg, vec![])
            }
        }
    }
}

impl std::fmt::Display for ErrorNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorNotice {}
