//! Random unwatched picker
//!
//! Draws one unwatched movie uniformly at random. The draw is purely
//! client-side: nothing is persisted until the caller explicitly confirms
//! by marking the pick watched, and no exclusivity is enforced against
//! concurrent pickers on other devices.

use std::sync::Arc;

use chrono::Utc;
use rand::Rng;
use randomizer_domain::Movie;

use crate::ports::list_store::StoreError;
use crate::ports::movie_store::MovieStore;

pub struct RandomPicker {
    store: Arc<dyn MovieStore>,
}

impl RandomPicker {
    pub fn new(store: Arc<dyn MovieStore>) -> Self {
        Self { store }
    }

    /// Pick one unwatched movie, or `None` when the backlog is empty
    pub async fn pick_random_unwatched(
        &self,
        list_id: &str,
    ) -> Result<Option<Movie>, StoreError> {
        let mut unwatched = self.store.unwatched_movies(list_id).await?;
        if unwatched.is_empty() {
            return Ok(None);
        }
        let index = rand::thread_rng().gen_range(0..unwatched.len());
        Ok(Some(unwatched.swap_remove(index)))
    }

    /// Confirm a pick: the same toggle as manual marking
    pub async fn mark_picked_watched(&self, movie: &Movie) -> Result<(), StoreError> {
        let watched = !movie.watched;
        let watched_at = watched.then(Utc::now);
        self.store.set_watched(&movie.id, watched, watched_at).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use randomizer_domain::NewMovie;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn movie(id: &str, watched: bool) -> Movie {
        Movie {
            id: id.to_string(),
            list_id: "list-1".to_string(),
            title: format!("Movie {id}"),
            year: None,
            notes: None,
            watched,
            created_at: Utc::now(),
            watched_at: None,
        }
    }

    struct StubMovies {
        unwatched: Vec<Movie>,
        watched_updates: Mutex<Vec<(String, bool, Option<DateTime<Utc>>)>>,
    }

    impl StubMovies {
        fn with_unwatched(unwatched: Vec<Movie>) -> Self {
            Self {
                unwatched,
                watched_updates: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl MovieStore for StubMovies {
        async fn list_movies(&self, _list_id: &str) -> Result<Vec<Movie>, StoreError> {
            Ok(self.unwatched.clone())
        }

        async fn unwatched_movies(&self, _list_id: &str) -> Result<Vec<Movie>, StoreError> {
            Ok(self.unwatched.clone())
        }

        async fn add_movie(&self, _movie: &NewMovie) -> Result<Movie, StoreError> {
            unimplemented!("not used in these tests")
        }

        async fn set_watched(
            &self,
            movie_id: &str,
            watched: bool,
            watched_at: Option<DateTime<Utc>>,
        ) -> Result<(), StoreError> {
            self.watched_updates
                .lock()
                .unwrap()
                .push((movie_id.to_string(), watched, watched_at));
            Ok(())
        }

        async fn remove_movie(&self, _movie_id: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_empty_backlog_returns_none() {
        let picker = RandomPicker::new(Arc::new(StubMovies::with_unwatched(Vec::new())));
        let picked = picker.pick_random_unwatched("list-1").await.unwrap();
        assert!(picked.is_none());
    }

    #[tokio::test]
    async fn test_every_movie_is_reachable() {
        let movies: Vec<Movie> = (0..5).map(|i| movie(&format!("m{i}"), false)).collect();
        let picker = RandomPicker::new(Arc::new(StubMovies::with_unwatched(movies)));

        let mut seen = HashSet::new();
        for _ in 0..300 {
            let picked = picker.pick_random_unwatched("list-1").await.unwrap().unwrap();
            seen.insert(picked.id);
        }
        assert_eq!(seen.len(), 5);
    }

    #[tokio::test]
    async fn test_mark_picked_watched_flips_and_stamps() {
        let store = Arc::new(StubMovies::with_unwatched(vec![movie("m1", false)]));
        let picker = RandomPicker::new(store.clone());

        picker.mark_picked_watched(&movie("m1", false)).await.unwrap();

        let updates = store.watched_updates.lock().unwrap();
        assert_eq!(updates.len(), 1);
        let (id, watched, watched_at) = &updates[0];
        assert_eq!(id, "m1");
        assert!(*watched);
        assert!(watched_at.is_some());
    }
}
