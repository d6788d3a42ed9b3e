//! Movie store port

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use randomizer_domain::{Movie, NewMovie};

use super::list_store::StoreError;

/// Backend for movie rows within a list
#[async_trait]
pub trait MovieStore: Send + Sync {
    /// All movies in a list, newest first
    async fn list_movies(&self, list_id: &str) -> Result<Vec<Movie>, StoreError>;

    /// Movies in a list with watched = false
    async fn unwatched_movies(&self, list_id: &str) -> Result<Vec<Movie>, StoreError>;

    /// Insert a new movie row
    async fn add_movie(&self, movie: &NewMovie) -> Result<Movie, StoreError>;

    /// Set the watched flag and timestamp on a movie
    async fn set_watched(
        &self,
        movie_id: &str,
        watched: bool,
        watched_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError>;

    /// Delete a movie row
    async fn remove_movie(&self, movie_id: &str) -> Result<(), StoreError>;
}
