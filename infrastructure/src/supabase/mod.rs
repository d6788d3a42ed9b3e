//! Supabase adapters
//!
//! Two REST surfaces of the same service: GoTrue for auth flows and
//! PostgREST for list/movie rows. Row-level authorization is enforced
//! server-side; these adapters just attach the anon key and the caller's
//! bearer token.

pub mod auth;
pub mod store;
pub mod types;
