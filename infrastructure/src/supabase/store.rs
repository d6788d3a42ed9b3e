//! PostgREST store adapter
//!
//! Implements [`ListStore`] and [`MovieStore`] over the Supabase REST
//! surface. Filters use PostgREST operator syntax (`list_id=eq.{id}`);
//! list creation and joining go through SQL RPC functions so the invite
//! and membership logic stays server-side.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use randomizer_application::ports::list_store::{ListStore, StoreError};
use randomizer_application::ports::movie_store::MovieStore;
use randomizer_domain::{Movie, MovieList, NewMovie, ShareCode};
use serde_json::json;

use crate::credentials::CredentialStore;
use crate::supabase::types::{InsertMovieRow, ListRow, MovieRow, WatchedUpdate};

pub struct SupabaseStore {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    credentials: Arc<CredentialStore>,
}

impl SupabaseStore {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        anon_key: impl Into<String>,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            credentials,
        }
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{path}", self.base_url)
    }

    /// Bearer token for row-level authorization
    fn access_token(&self) -> Result<String, StoreError> {
        let session = self
            .credentials
            .load()
            .map_err(|e| StoreError::Transport(e.to_string()))?
            .ok_or(StoreError::NotAuthenticated)?;
        Ok(session.access_token().to_string())
    }

    fn request(
        &self,
        method: reqwest::Method,
        url: String,
    ) -> Result<reqwest::RequestBuilder, StoreError> {
        let token = self.access_token()?;
        Ok(self
            .http
            .request(method, url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token))
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(StoreError::NotAuthenticated);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected(format!("{status}: {body}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl ListStore for SupabaseStore {
    async fn my_lists(&self) -> Result<Vec<MovieList>, StoreError> {
        let response = self
            .request(reqwest::Method::GET, self.rest_url("lists"))?
            .query(&[
                ("select", "id,name,share_code,created_at"),
                ("order", "created_at.desc"),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let rows: Vec<ListRow> = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(rows.into_iter().map(MovieList::from).collect())
    }

    async fn create_list(&self, name: &str) -> Result<String, StoreError> {
        let response = self
            .request(reqwest::Method::POST, self.rest_url("rpc/create_list"))?
            .json(&json!({ "p_name": name }))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        self.check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }

    async fn join_by_code(&self, code: &ShareCode) -> Result<String, StoreError> {
        let response = self
            .request(reqwest::Method::POST, self.rest_url("rpc/join_list"))?
            .json(&json!({ "p_code": code.as_str() }))
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        self.check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))
    }
}

#[async_trait]
impl MovieStore for SupabaseStore {
    async fn list_movies(&self, list_id: &str) -> Result<Vec<Movie>, StoreError> {
        let list_filter = format!("eq.{list_id}");
        let response = self
            .request(reqwest::Method::GET, self.rest_url("movies"))?
            .query(&[
                ("select", "*"),
                ("list_id", list_filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let rows: Vec<MovieRow> = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn unwatched_movies(&self, list_id: &str) -> Result<Vec<Movie>, StoreError> {
        let list_filter = format!("eq.{list_id}");
        let response = self
            .request(reqwest::Method::GET, self.rest_url("movies"))?
            .query(&[
                ("select", "*"),
                ("list_id", list_filter.as_str()),
                ("watched", "eq.false"),
            ])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let rows: Vec<MovieRow> = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn add_movie(&self, movie: &NewMovie) -> Result<Movie, StoreError> {
        let response = self
            .request(reqwest::Method::POST, self.rest_url("movies"))?
            .header("Prefer", "return=representation")
            .json(&[InsertMovieRow::from(movie)])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let mut rows: Vec<MovieRow> = self
            .check(response)
            .await?
            .json()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        if rows.is_empty() {
            return Err(StoreError::Rejected(
                "insert returned no representation".to_string(),
            ));
        }
        Ok(Movie::from(rows.remove(0)))
    }

    async fn set_watched(
        &self,
        movie_id: &str,
        watched: bool,
        watched_at: Option<DateTime<Utc>>,
    ) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::PATCH, self.rest_url("movies"))?
            .query(&[("id", &format!("eq.{movie_id}"))])
            .json(&WatchedUpdate {
                watched,
                watched_at,
            })
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        self.check(response).await?;
        Ok(())
    }

    async fn remove_movie(&self, movie_id: &str) -> Result<(), StoreError> {
        let response = self
            .request(reqwest::Method::DELETE, self.rest_url("movies"))?
            .query(&[("id", &format!("eq.{movie_id}"))])
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        self.check(response).await?;
        Ok(())
    }
}
