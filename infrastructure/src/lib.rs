//! Infrastructure layer for movie-randomizer
//!
//! Concrete adapters for the application ports: Supabase (GoTrue auth +
//! PostgREST stores) and TMDB (title lookup), plus the credential file
//! store and the configuration loader.

pub mod config;
pub mod credentials;
pub mod supabase;
pub mod tmdb;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig};
pub use credentials::{CredentialError, CredentialStore, RedirectTokens};
pub use supabase::{auth::SupabaseAuth, store::SupabaseStore};
pub use tmdb::TmdbSearch;
