//! Port definitions (interfaces to the outside world)
//!
//! Ports are async traits implemented by infrastructure adapters. The
//! application layer only ever sees these interfaces.

pub mod auth_backend;
pub mod list_store;
pub mod movie_store;
pub mod title_search;
