//! Domain layer for movie-randomizer
//!
//! This crate contains the core entities and value objects of the shared
//! movie-list application. It has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Session
//!
//! The authentication credential bundle for a logged-in user, or its
//! absence. It is fetched lazily, replaced wholesale on every refresh or
//! sign-out, and shared process-wide (last writer wins).
//!
//! ## Share code
//!
//! A short invite token that lets a user join someone else's list. Lists
//! are collaborative: everyone who joined sees the same movies.

pub mod auth;
pub mod core;
pub mod list;
pub mod movie;
pub mod search;

// Re-export commonly used types
pub use auth::session::Session;
pub use self::core::error::DomainError;
pub use list::{entities::MovieList, value_objects::ShareCode};
pub use movie::entities::{Movie, NewMovie};
pub use search::{entities::Suggestion, value_objects::SearchQuery};
