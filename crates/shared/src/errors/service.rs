use crate::errors::{client::ClientError, storage::StorageError};
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Validation failed: {0:?}")]
    Validation(Vec<String>),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ServiceError {
    pub fn is_authorization_lost(&self) -> bool {
        matches!(self, ServiceError::Client(err) if err.is_authorization_lost())
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .map(|(field, errs)| {
                let codes: Vec<&str> = errs.iter().map(|e| &*e.code).collect();
                format!("{field}: {}", codes.join(", "))
            })
            .collect();
        messages.sort();
        ServiceError::Validation(messages)
    }
}
