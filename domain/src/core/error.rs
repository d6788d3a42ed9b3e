//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// The taxonomy is deliberately small: transport problems (backend
/// unreachable), explicit auth-flow failures, and validation failures
/// (e.g. adding a movie without an authenticated user).
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl DomainError {
    /// Check if this error is a transport-level failure
    pub fn is_transport(&self) -> bool {
        matches!(self, DomainError::Transport(_))
    }

    /// Check if this error is an auth-flow failure
    pub fn is_auth(&self) -> bool {
        matches!(self, DomainError::Auth(_))
    }
}
