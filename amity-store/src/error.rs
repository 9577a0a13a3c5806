use thiserror::Error;

use crate::UserId;

/// Errors surfaced by the store and the friendship operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("user with requested id {0} not found")]
    NotFound(UserId),
    #[error("invalid request: {0}")]
    Validation(String),
    #[error("internal store failure: {0}")]
    Internal(String),
}

impl UserError {
    pub fn validation(message: impl Into<String>) -> Self {
        UserError::Validation(message.into())
    }

    /// Stable machine-readable code used in error envelopes.
    pub fn code(&self) -> &'static str {
        match self {
            UserError::NotFound(_) => "not_found",
            UserError::Validation(_) => "invalid_request",
            UserError::Internal(_) => "internal",
        }
    }
}
