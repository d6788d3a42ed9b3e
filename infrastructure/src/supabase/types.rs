//! Supabase wire types

use chrono::{DateTime, Utc};
use randomizer_domain::{Movie, MovieList, NewMovie, Session};
use serde::{Deserialize, Serialize};

/// Row shape of the `lists` table
#[derive(Debug, Clone, Deserialize)]
pub struct ListRow {
    pub id: String,
    pub name: String,
    pub share_code: String,
    pub created_at: DateTime<Utc>,
}

impl From<ListRow> for MovieList {
    fn from(row: ListRow) -> Self {
        MovieList {
            id: row.id,
            name: row.name,
            share_code: row.share_code,
            created_at: row.created_at,
        }
    }
}

/// Row shape of the `movies` table
#[derive(Debug, Clone, Deserialize)]
pub struct MovieRow {
    pub id: String,
    pub list_id: String,
    pub title: String,
    pub year: Option<i32>,
    pub notes: Option<String>,
    pub watched: bool,
    pub created_at: DateTime<Utc>,
    pub watched_at: Option<DateTime<Utc>>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            id: row.id,
            list_id: row.list_id,
            title: row.title,
            year: row.year,
            notes: row.notes,
            watched: row.watched,
            created_at: row.created_at,
            watched_at: row.watched_at,
        }
    }
}

/// Insert payload for the `movies` table
#[derive(Debug, Clone, Serialize)]
pub struct InsertMovieRow<'a> {
    pub list_id: &'a str,
    pub title: &'a str,
    pub year: Option<i32>,
    pub created_by: &'a str,
}

impl<'a> From<&'a NewMovie> for InsertMovieRow<'a> {
    fn from(movie: &'a NewMovie) -> Self {
        Self {
            list_id: &movie.list_id,
            title: &movie.title,
            year: movie.year,
            created_by: &movie.created_by,
        }
    }
}

/// Update payload for toggling the watched flag
#[derive(Debug, Clone, Serialize)]
pub struct WatchedUpdate {
    pub watched: bool,
    pub watched_at: Option<DateTime<Utc>>,
}

/// GoTrue user payload (subset)
#[derive(Debug, Clone, Deserialize)]
pub struct UserPayload {
    pub id: String,
    #[serde(default)]
    pub email: String,
}

/// GoTrue token grant response
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub user: UserPayload,
}

impl TokenResponse {
    /// Build a session expiring `expires_in` seconds from now
    pub fn into_session(self) -> Session {
        let expires_at = Utc::now() + chrono::Duration::seconds(self.expires_in);
        Session::new(
            self.user.id,
            self.user.email,
            self.access_token,
            self.refresh_token,
            expires_at,
        )
    }
}
