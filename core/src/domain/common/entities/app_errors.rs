use thiserror::Error;

use crate::domain::filter::errors::FilterError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Resource not found")]
    NotFound,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{0} already exists")]
    AlreadyExists(String),

    #[error("Role '{0}' does not exist")]
    UnknownRole(String),

    #[error("Permission '{0}' does not exist")]
    UnknownPermission(String),

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error(transparent)]
    InvalidFilter(#[from] FilterError),

    #[error("Failed to hash password")]
    HashPasswordError,

    #[error("Internal server error")]
    InternalServerError,
}
