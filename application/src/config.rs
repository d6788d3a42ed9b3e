//! Application behavior configuration

use std::time::Duration;

/// Tuning knobs for the title-search pipeline
///
/// Defaults mirror the behavior users expect from the autocomplete box:
/// a 250 ms quiet period, lookups from 2 characters, at most 8 rows shown.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Quiet period required before a submission is processed
    pub debounce: Duration,
    /// Minimum trimmed length before a lookup is issued
    pub min_query_chars: usize,
    /// Cap on the number of suggestions kept from a lookup
    pub max_suggestions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(250),
            min_query_chars: 2,
            max_suggestions: 8,
        }
    }
}

impl SearchConfig {
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.debounce, Duration::from_millis(250));
        assert_eq!(config.min_query_chars, 2);
        assert_eq!(config.max_suggestions, 8);
    }
}
