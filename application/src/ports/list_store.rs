//! List store port

use async_trait::async_trait;
use randomizer_domain::{MovieList, ShareCode};
use thiserror::Error;

/// Errors that can occur during store operations
///
/// Shared by the list and movie stores; both talk to the same backing
/// service and fail the same ways.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Not authenticated")]
    NotAuthenticated,
}

/// Backend for list CRUD and membership
///
/// Row-level authorization is enforced by the backing service; these calls
/// only ever see the caller's own rows.
#[async_trait]
pub trait ListStore: Send + Sync {
    /// Lists the caller belongs to, newest first
    async fn my_lists(&self) -> Result<Vec<MovieList>, StoreError>;

    /// Create a list, returning its id
    async fn create_list(&self, name: &str) -> Result<String, StoreError>;

    /// Join an existing list by share code, returning the list id
    async fn join_by_code(&self, code: &ShareCode) -> Result<String, StoreError>;
}
