//! Search value objects

/// A submitted search input tagged with its generation (Value Object)
///
/// The generation is a monotonically increasing counter assigned at the
/// moment of submission. Only the result belonging to the highest
/// generation submitted so far may reach the visible suggestion list;
/// anything older is discarded unconditionally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    generation: u64,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, generation: u64) -> Self {
        Self {
            text: text.into(),
            generation,
        }
    }

    /// The raw submitted text, as typed
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The trimmed text actually sent to the lookup backend
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the trimmed input is long enough to be worth a lookup
    pub fn is_searchable(&self, min_chars: usize) -> bool {
        self.trimmed().chars().count() >= min_chars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimmed_strips_whitespace() {
        let q = SearchQuery::new("  matrix ", 1);
        assert_eq!(q.trimmed(), "matrix");
    }

    #[test]
    fn test_searchable_threshold() {
        assert!(!SearchQuery::new("a", 1).is_searchable(2));
        assert!(!SearchQuery::new(" a ", 1).is_searchable(2));
        assert!(SearchQuery::new("ab", 1).is_searchable(2));
    }
}
