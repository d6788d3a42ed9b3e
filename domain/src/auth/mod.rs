//! Authentication domain types

pub mod session;

pub use session::Session;
