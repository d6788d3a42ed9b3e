//! Configuration loader with multi-source merging

use super::file_config::{ConfigError, FileConfig};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

/// Loads and merges configuration sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `RANDOMIZER_SUPABASE__URL`, `RANDOMIZER_TMDB__API_KEY`, …
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./randomizer.toml`
    /// 4. Global: `<config dir>/movie-randomizer/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        let project_path = PathBuf::from("randomizer.toml");
        if project_path.exists() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("RANDOMIZER_").split("__"));

        figment.extract().map_err(|e| ConfigError::Load(Box::new(e)))
    }

    /// Global config file location
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("movie-randomizer").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_explicit_path_overrides_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            r#"
            [supabase]
            url = "https://example.supabase.co"
            anon_key = "anon"

            [search]
            debounce_ms = 100
            "#,
        )
        .unwrap();

        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.supabase.url, "https://example.supabase.co");
        assert_eq!(config.search.debounce_ms, 100);
        // Untouched sections keep defaults
        assert_eq!(config.search.max_suggestions, 8);
    }
}
