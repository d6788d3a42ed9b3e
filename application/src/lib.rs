//! Application layer for movie-randomizer
//!
//! This crate contains use cases and port definitions. It depends only on
//! the domain layer; concrete backends (Supabase, TMDB) live in the
//! infrastructure crate.
//!
//! The two components with real concurrency hazards are here:
//!
//! - [`SessionCache`] — de-duplicates concurrent session loads so at most
//!   one upstream fetch is in flight at a time.
//! - [`SearchCoordinator`] — turns a stream of keystrokes into at most one
//!   live title lookup (debounce, distinct, switch-latest, error
//!   absorption).

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::SearchConfig;
pub use ports::{
    auth_backend::{AuthBackend, AuthError},
    list_store::{ListStore, StoreError},
    movie_store::MovieStore,
    title_search::{SearchError, TitleSearchBackend},
};
pub use use_cases::lists::ListsUseCase;
pub use use_cases::movies::MoviesUseCase;
pub use use_cases::pick_random::RandomPicker;
pub use use_cases::search_coordinator::{SearchCoordinator, SuggestionSelection};
pub use use_cases::session_cache::SessionCache;
