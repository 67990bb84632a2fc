use thiserror::Error;

/// Failure of a call through the API gateway client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered 401. The local session has already been cleared.
    #[error("Authorization lost, please log in again")]
    AuthorizationLost,

    /// Any other non-success status, or a transport failure (`status` is `None`).
    #[error("{message}")]
    RequestFailed { status: Option<u16>, message: String },
}

impl ClientError {
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        ClientError::RequestFailed {
            status,
            message: message.into(),
        }
    }

    pub fn is_authorization_lost(&self) -> bool {
        matches!(self, ClientError::AuthorizationLost)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::AuthorizationLost => Some(401),
            ClientError::RequestFailed { status, .. } => *status,
        }
    }
}
