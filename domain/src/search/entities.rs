//! Search suggestion entities

use serde::{Deserialize, Serialize};

/// A candidate title returned by the lookup backend (Entity)
///
/// Suggestions are ephemeral: the visible set is replaced in full on every
/// query cycle, never merged or appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: u64,
    pub title: String,
    pub release_date: Option<String>,
}

impl Suggestion {
    pub fn new(id: u64, title: impl Into<String>, release_date: Option<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date,
        }
    }

    /// Release year derived from the leading 4 characters of the release
    /// date, or `None` when absent or unparseable (e.g. "TBA").
    pub fn release_year(&self) -> Option<i32> {
        let date = self.release_date.as_deref()?;
        let prefix = date.get(..4)?;
        prefix.parse::<i32>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_year_from_full_date() {
        let s = Suggestion::new(1, "The Matrix", Some("1999-03-31".to_string()));
        assert_eq!(s.release_year(), Some(1999));
    }

    #[test]
    fn test_release_year_absent() {
        let s = Suggestion::new(1, "Untitled Project", None);
        assert_eq!(s.release_year(), None);
    }

    #[test]
    fn test_release_year_malformed() {
        let s = Suggestion::new(1, "Untitled Project", Some("TBA".to_string()));
        assert_eq!(s.release_year(), None);
    }

    #[test]
    fn test_release_year_too_short() {
        let s = Suggestion::new(1, "Untitled Project", Some("99".to_string()));
        assert_eq!(s.release_year(), None);
    }
}
