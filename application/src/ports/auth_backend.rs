//! Auth backend port
//!
//! Defines the interface to the upstream authentication service
//! (magic-link dispatch, session probing, sign-out).

use async_trait::async_trait;
use randomizer_domain::Session;
use thiserror::Error;

/// Errors that can occur during auth backend operations
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Auth request rejected: {0}")]
    Rejected(String),
}

/// Backend for authentication flows
///
/// Implementations (adapters) live in the infrastructure layer. Note that
/// `get_session` may fail transiently (e.g. a storage lock conflict); the
/// [`SessionCache`](crate::SessionCache) absorbs such failures into a
/// logged-out state rather than surfacing them.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Resolve the current session, if any
    async fn get_session(&self) -> Result<Option<Session>, AuthError>;

    /// Send a one-time login link to the given address
    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), AuthError>;

    /// Invalidate the current session upstream
    async fn sign_out(&self) -> Result<(), AuthError>;
}
