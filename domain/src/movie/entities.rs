//! Movie entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A movie in a shared list (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub list_id: String,
    pub title: String,
    pub year: Option<i32>,
    pub notes: Option<String>,
    pub watched: bool,
    pub created_at: DateTime<Utc>,
    pub watched_at: Option<DateTime<Utc>>,
}

/// Insert payload for a new movie
///
/// The title is trimmed at construction so the stored row never carries
/// leading or trailing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewMovie {
    pub list_id: String,
    pub title: String,
    pub year: Option<i32>,
    pub created_by: String,
}

impl NewMovie {
    pub fn new(
        list_id: impl Into<String>,
        title: &str,
        year: Option<i32>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            list_id: list_id.into(),
            title: title.trim().to_string(),
            year,
            created_by: created_by.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_movie_trims_title() {
        let movie = NewMovie::new("list-1", "  The Matrix  ", Some(1999), "user-1");
        assert_eq!(movie.title, "The Matrix");
        assert_eq!(movie.year, Some(1999));
    }
}
