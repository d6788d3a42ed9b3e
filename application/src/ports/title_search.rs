//! Title search port
//!
//! Defines the interface to the remote movie-title lookup used by the
//! autocomplete pipeline.

use async_trait::async_trait;
use randomizer_domain::Suggestion;
use thiserror::Error;

/// Errors that can occur during a title lookup
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Backend for remote title lookups
///
/// The coordinator treats every error identically to an empty result, so
/// implementations are free to fail loudly here.
#[async_trait]
pub trait TitleSearchBackend: Send + Sync {
    /// Look up candidate titles for a (pre-trimmed) query
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, SearchError>;
}
