use crate::presentation::dtos::ErrorNotice;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

pub trait ValidatedCommand: DeserializeOwned + Validate {}

#[derive(Debug, thiserror::Error)]
pub enum ValidationMiddlewareError {
    #[error("Validation failed: {0}")]
    ValidationFailed(ValidationErrors),
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),
}

impl From<ValidationMiddlewareError> for ErrorNotice {
    fn from(error: ValidationMiddlewareError) -> Self {
        match error {
            ValidationMiddlewareError::ValidationFailed(errors) => {
                let mut validation_errors = Vec::new();

                for (field, field_errors) in errors.field_errors() {
                    for error in field_errors {
                        validation_errors.push(format!(
                            "{}: {}",
                            field,
                            error
                                .message
                                .as_ref()
                                .map_or("Invalid value".to_string(), |m| m.to_string())
                        ));
                    }
                }

                ErrorNotice::new("VALIDATION_ERROR", "Request validation failed", validation_errors)
            }
            ValidationMiddlewareError::DeserializationFailed(message) => {
                ErrorNotice::new("DESERIALIZATION_ERROR", &message, vec![])
            }
        }
    }
}

pub fn validate_request<T: ValidatedCommand>(json: &str) -> Result<T, ValidationMiddlewareError> {
    let command: T = serde_json::from_str(json)
        .map_err(|e| ValidationMiddlewareError::DeserializationFailed(e.to_string()))?;

    command
        .validate()
        .map_err(ValidationMiddlewareError::ValidationFailed)?;

    Ok(command)
}

/// Parses and validates `json`, then hands the command to `handler`.
pub async fn validate_command<T, F, Fut, R, E>(json: &str, handler: F) -> Result<R, ErrorNotice>
where
    T: ValidatedCommand,
    F: FnOnce(T) -> Fut,
    Fut: std::future::Future<Output = Result<R, E>>,
    E: Into<ErrorNotice>,
{
    let command = validate_request::<T>(json)?;
    handler(command).await.map_err(|e| e.into())
}
