//! Title-search domain types

pub mod entities;
pub mod value_objects;

pub use entities::Suggestion;
pub use value_objects::SearchQuery;
