pub mod auth_service;
pub mod device_service;
pub mod network_node_service;

use thiserror::Error;

use crate::auth::AuthError;
use crate::database::DatabaseError;

pub use auth_service::AuthService;
pub use device_service::DeviceService;
pub use network_node_service::{NetworkNodeService, NodeDetail};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{field}: {message}")]
    Validation { field: String, message: String },
}

impl ServiceError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ServiceError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}
