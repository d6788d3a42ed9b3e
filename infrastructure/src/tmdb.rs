//! TMDB title lookup adapter
//!
//! Implements [`TitleSearchBackend`] over The Movie Database search API.
//! One page is enough; the coordinator caps how many rows are kept.

use async_trait::async_trait;
use randomizer_application::ports::title_search::{SearchError, TitleSearchBackend};
use randomizer_domain::Suggestion;
use serde::Deserialize;

/// Default API root
const TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

pub struct TmdbSearch {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl TmdbSearch {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: TMDB_BASE_URL.to_string(),
            api_key: api_key.into(),
            language: language.into(),
        }
    }

    /// Override the API root (tests, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<MovieResult>,
}

#[derive(Debug, Deserialize)]
struct MovieResult {
    id: u64,
    title: String,
    #[serde(default)]
    release_date: Option<String>,
}

impl From<MovieResult> for Suggestion {
    fn from(result: MovieResult) -> Self {
        // TMDB sends "" for unscheduled titles; treat it as absent
        let release_date = result.release_date.filter(|d| !d.is_empty());
        Suggestion::new(result.id, result.title, release_date)
    }
}

#[async_trait]
impl TitleSearchBackend for TmdbSearch {
    async fn search(&self, query: &str) -> Result<Vec<Suggestion>, SearchError> {
        let response = self
            .http
            .get(format!("{}/search/movie", self.base_url))
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("include_adult", "false"),
                ("language", self.language.as_str()),
                ("page", "1"),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SearchError::Transport(format!(
                "search returned {}",
                response.status()
            )));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Malformed(e.to_string()))?;
        Ok(body.results.into_iter().map(Suggestion::from).collect())
    }
}
