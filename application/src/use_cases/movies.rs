//! Movie management use case
//!
//! Sequential plumbing over the movie store. The one rule enforced here:
//! adding a movie requires an authenticated user, resolved through the
//! session cache.

use std::sync::Arc;

use chrono::Utc;
use randomizer_domain::{Movie, NewMovie};

use crate::ports::list_store::StoreError;
use crate::ports::movie_store::MovieStore;
use crate::use_cases::session_cache::SessionCache;

pub struct MoviesUseCase {
    sessions: Arc<SessionCache>,
    store: Arc<dyn MovieStore>,
}

impl MoviesUseCase {
    pub fn new(sessions: Arc<SessionCache>, store: Arc<dyn MovieStore>) -> Self {
        Self { sessions, store }
    }

    /// All movies in a list, newest first
    pub async fn list_movies(&self, list_id: &str) -> Result<Vec<Movie>, StoreError> {
        self.store.list_movies(list_id).await
    }

    /// Add a movie on behalf of the authenticated user
    pub async fn add_movie(
        &self,
        list_id: &str,
        title: &str,
        year: Option<i32>,
    ) -> Result<Movie, StoreError> {
        let Some(session) = self.sessions.load_session().await else {
            return Err(StoreError::NotAuthenticated);
        };
        if title.trim().is_empty() {
            return Err(StoreError::Rejected("title is empty".to_string()));
        }
        let movie = NewMovie::new(list_id, title, year, session.user_id());
        self.store.add_movie(&movie).await
    }

    /// Flip the watched flag, stamping or clearing the watched timestamp
    pub async fn toggle_watched(&self, movie: &Movie) -> Result<(), StoreError> {
        let watched = !movie.watched;
        let watched_at = watched.then(Utc::now);
        self.store.set_watched(&movie.id, watched, watched_at).await
    }

    /// Delete a movie row
    pub async fn remove_movie(&self, movie_id: &str) -> Result<(), StoreError> {
        self.store.remove_movie(movie_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::auth_backend::{AuthBackend, AuthError};
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone};
    use randomizer_domain::Session;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StubAuth {
        session: Option<Session>,
    }

    #[async_trait]
    impl AuthBackend for StubAuth {
        async fn get_session(&self) -> Result<Option<Session>, AuthError> {
            Ok(self.session.clone())
        }

        async fn send_magic_link(&self, _email: &str, _redirect_to: &str) -> Result<(), AuthError> {
            Ok(())
        }

        async fn sign_out(&self) -> Result<(), AuthError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct StubMovies {
        added: Mutex<Vec<NewMovie>>,
        set_watched_calls: AtomicUsize,
    }

    #[async_trait]
    impl MovieStore for StubMovies {
        async fn list_movies(&self, _list_id: &str) -> Result<Vec<Movie>, StoreError> {
            Ok(Vec::new())
        }

        async fn unwatched_movies(&self, _list_id: &str) -> Result<Vec<Movie>, StoreError> {
            Ok(Vec::new())
        }

        async fn add_movie(&self, movie: &NewMovie) -> Result<Movie, StoreError> {
            self.added.lock().unwrap().push(movie.clone());
            Ok(Movie {
                id: "m1".to_string(),
                list_id: movie.list_id.clone(),
                title: movie.title.clone(),
                year: movie.year,
                notes: None,
                watched: false,
                created_at: Utc::now(),
                watched_at: None,
            })
        }

        async fn set_watched(
            &self,
            _movie_id: &str,
            _watched: bool,
            _watched_at: Option<DateTime<Utc>>,
        ) -> Result<(), StoreError> {
            self.set_watched_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn remove_movie(&self, _movie_id: &str) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn use_case(session: Option<Session>) -> (MoviesUseCase, Arc<StubMovies>) {
        let sessions = Arc::new(SessionCache::new(Arc::new(StubAuth { session })));
        let store = Arc::new(StubMovies::default());
        (MoviesUseCase::new(sessions, store.clone()), store)
    }

    fn logged_in_session() -> Session {
        Session::new(
            "user-1",
            "mati@example.com",
            "access",
            "refresh",
            Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_add_movie_requires_authenticated_user() {
        let (movies, store) = use_case(None);
        let result = movies.add_movie("list-1", "The Matrix", Some(1999)).await;
        assert!(matches!(result, Err(StoreError::NotAuthenticated)));
        assert!(store.added.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_movie_stamps_creator_and_trims_title() {
        let (movies, store) = use_case(Some(logged_in_session()));
        movies
            .add_movie("list-1", "  The Matrix ", Some(1999))
            .await
            .unwrap();

        let added = store.added.lock().unwrap();
        assert_eq!(added[0].title, "The Matrix");
        assert_eq!(added[0].created_by, "user-1");
    }

    #[tokio::test]
    async fn test_add_movie_rejects_blank_title() {
        let (movies, _) = use_case(Some(logged_in_session()));
        let result = movies.add_movie("list-1", "   ", None).await;
        assert!(matches!(result, Err(StoreError::Rejected(_))));
    }

    #[tokio::test]
    async fn test_toggle_watched_calls_store() {
        let (movies, store) = use_case(Some(logged_in_session()));
        let movie = Movie {
            id: "m1".to_string(),
            list_id: "list-1".to_string(),
            title: "The Matrix".to_string(),
            year: Some(1999),
            notes: None,
            watched: false,
            created_at: Utc::now(),
            watched_at: None,
        };
        movies.toggle_watched(&movie).await.unwrap();
        assert_eq!(store.set_watched_calls.load(Ordering::SeqCst), 1);
    }
}
