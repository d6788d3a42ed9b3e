//! GoTrue auth adapter
//!
//! Implements [`AuthBackend`] over the Supabase auth REST API. Session
//! state for the CLI lives in the credential file store; `get_session`
//! reads it and silently refreshes an expired access token through the
//! refresh-token grant.

use std::sync::Arc;

use async_trait::async_trait;
use randomizer_application::ports::auth_backend::{AuthBackend, AuthError};
use randomizer_domain::Session;
use serde_json::json;
use tracing::debug;

use crate::credentials::{CredentialStore, RedirectTokens};
use crate::supabase::types::{TokenResponse, UserPayload};

pub struct SupabaseAuth {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    credentials: Arc<CredentialStore>,
}

impl SupabaseAuth {
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

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    /// Finish the magic-link flow from the pasted redirect URL: extract
    /// the tokens, resolve the user identity, persist the session.
    pub async fn complete_login(&self, redirect_url: &str) -> Result<Session, AuthError> {
        let tokens = RedirectTokens::from_redirect_url(redirect_url)
            .map_err(|e| AuthError::Rejected(e.to_string()))?;
        let user = self.fetch_user(&tokens.access_token).await?;
        let expires_at = chrono::Utc::now() + chrono::Duration::seconds(tokens.expires_in);
        let session = Session::new(
            user.id,
            user.email,
            tokens.access_token,
            tokens.refresh_token,
            expires_at,
        );
        self.credentials
            .save(&session)
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(session)
    }

    async fn fetch_user(&self, access_token: &str) -> Result<UserPayload, AuthError> {
        let response = self
            .http
            .get(self.auth_url("user"))
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AuthError::Rejected(format!(
                "user endpoint returned {}",
                response.status()
            )));
        }
        response
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let response = self
            .http
            .post(self.auth_url("token"))
            .query(&[("grant_type", "refresh_token")])
            .header("apikey", &self.anon_key)
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AuthError::Rejected(format!(
                "token refresh returned {}",
                response.status()
            )));
        }
        let granted: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(granted.into_session())
    }
}

#[async_trait]
impl AuthBackend for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Session>, AuthError> {
        let stored = self
            .credentials
            .load()
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        let Some(session) = stored else {
            return Ok(None);
        };
        if !session.is_expired() {
            return Ok(Some(session));
        }

        debug!("stored access token expired, attempting silent refresh");
        match self.refresh(session.refresh_token()).await {
            Ok(refreshed) => {
                self.credentials
                    .save(&refreshed)
                    .map_err(|e| AuthError::Transport(e.to_string()))?;
                Ok(Some(refreshed))
            }
            Err(AuthError::Rejected(reason)) => {
                // Refresh token consumed or revoked: the stored session is
                // dead weight, drop it and report logged out
                debug!(%reason, "refresh rejected, clearing stored session");
                let _ = self.credentials.clear();
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    async fn send_magic_link(&self, email: &str, redirect_to: &str) -> Result<(), AuthError> {
        let response = self
            .http
            .post(self.auth_url("otp"))
            .query(&[("redirect_to", redirect_to)])
            .header("apikey", &self.anon_key)
            .json(&json!({ "email": email, "create_user": true }))
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(AuthError::Rejected(format!(
                "magic link request returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        let stored = self
            .credentials
            .load()
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        if let Some(session) = stored {
            let response = self
                .http
                .post(self.auth_url("logout"))
                .header("apikey", &self.anon_key)
                .bearer_auth(session.access_token())
                .send()
                .await
                .map_err(|e| AuthError::Transport(e.to_string()))?;
            // 401 means the token is already dead upstream; local cleanup
            // still applies
            if !response.status().is_success()
                && response.status() != reqwest::StatusCode::UNAUTHORIZED
            {
                return Err(AuthError::Rejected(format!(
                    "logout returned {}",
                    response.status()
                )));
            }
        }
        self.credentials
            .clear()
            .map_err(|e| AuthError::Transport(e.to_string()))?;
        Ok(())
    }
}
