use shelf_model::{EntityId, ModelError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid {field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },

    #[error("invalid filter: {0}")]
    InvalidFilter(String),

    #[error("{resource} not found: {id}")]
    NotFound {
        resource: &'static str,
        id: EntityId,
    },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Coarse error category, used by boundaries to pick a transport status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    InvalidFilter,
    NotFound,
    Conflict,
    Storage,
}

impl CoreError {
    pub fn not_found(resource: &'static str, id: EntityId) -> Self {
        CoreError::NotFound { resource, id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::Validation { .. } => ErrorKind::Validation,
            CoreError::InvalidFilter(_) => ErrorKind::InvalidFilter,
            CoreError::NotFound { .. } => ErrorKind::NotFound,
            CoreError::Conflict(_) => ErrorKind::Conflict,
            CoreError::Storage(_) => ErrorKind::Storage,
        }
    }
}

impl From<ModelError> for CoreError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation { field, message } => CoreError::Validation { field, message },
            ModelError::InvalidFilter(msg) => CoreError::InvalidFilter(msg),
        }
    }
}
