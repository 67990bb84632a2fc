mod client;
mod error;
mod service;
mod storage;

pub use self::client::ClientError;
pub use self::error::{ErrorResponse, error_message_from_body};
pub use self::service::ServiceError;
pub use self::storage::StorageError;
