//! Movie-list domain types

pub mod entities;
pub mod value_objects;

pub use entities::MovieList;
pub use value_objects::ShareCode;
