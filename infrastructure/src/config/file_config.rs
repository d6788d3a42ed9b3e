//! Configuration file schema

use randomizer_application::SearchConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing setting: {0}")]
    Missing(&'static str),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),
}

/// `randomizer.toml` schema
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub supabase: SupabaseSection,
    #[serde(default)]
    pub tmdb: TmdbSection,
    #[serde(default)]
    pub search: SearchSection,
}

impl FileConfig {
    /// Reject configurations that cannot possibly talk to the backends
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.supabase.url.is_empty() {
            return Err(ConfigError::Missing("supabase.url"));
        }
        if self.supabase.anon_key.is_empty() {
            return Err(ConfigError::Missing("supabase.anon_key"));
        }
        if self.tmdb.api_key.is_empty() {
            return Err(ConfigError::Missing("tmdb.api_key"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupabaseSection {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`
    #[serde(default)]
    pub url: String,
    /// Public anon key (row-level security does the real gatekeeping)
    #[serde(default)]
    pub anon_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbSection {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for TmdbSection {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            language: default_language(),
        }
    }
}

fn default_language() -> String {
    "es-AR".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSection {
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_min_query_chars")]
    pub min_query_chars: usize,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
            min_query_chars: default_min_query_chars(),
            max_suggestions: default_max_suggestions(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    250
}

fn default_min_query_chars() -> usize {
    2
}

fn default_max_suggestions() -> usize {
    8
}

impl From<&SearchSection> for SearchConfig {
    fn from(section: &SearchSection) -> Self {
        SearchConfig {
            debounce: Duration::from_millis(section.debounce_ms),
            min_query_chars: section.min_query_chars,
            max_suggestions: section.max_suggestions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileConfig::default();
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.search.min_query_chars, 2);
        assert_eq!(config.search.max_suggestions, 8);
        assert_eq!(config.tmdb.language, "es-AR");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            [supabase]
            url = "https://example.supabase.co"
            anon_key = "anon"

            [tmdb]
            api_key = "key"
            "#,
        )
        .unwrap();
        assert_eq!(config.supabase.url, "https://example.supabase.co");
        assert_eq!(config.search.debounce_ms, 250);
        assert_eq!(config.tmdb.language, "es-AR");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_flags_missing_keys() {
        let config = FileConfig::default();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("supabase.url"))
        ));
    }

    #[test]
    fn test_search_section_converts_to_search_config() {
        let section = SearchSection {
            debounce_ms: 100,
            min_query_chars: 3,
            max_suggestions: 5,
        };
        let config = SearchConfig::from(&section);
        assert_eq!(config.debounce, Duration::from_millis(100));
        assert_eq!(config.min_query_chars, 3);
        assert_eq!(config.max_suggestions, 5);
    }
}
