//! Movie domain types

pub mod entities;

pub use entities::{Movie, NewMovie};
