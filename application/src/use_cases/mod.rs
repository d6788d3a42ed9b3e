//! Application use cases

pub mod lists;
pub mod movies;
pub mod pick_random;
pub mod search_coordinator;
pub mod session_cache;
