//! Credential file store
//!
//! A CLI client has no browser local storage, so the session lives in a
//! small JSON file under the platform config directory. The magic-link
//! flow ends with the user pasting the redirect URL back into the CLI;
//! [`RedirectTokens::from_redirect_url`] digs the tokens out of its
//! fragment.

use std::fs;
use std::path::{Path, PathBuf};

use randomizer_domain::Session;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Failed to read credentials: {0}")]
    Read(#[from] std::io::Error),

    #[error("Corrupt credential file: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("Invalid redirect URL: {0}")]
    InvalidRedirect(String),
}

/// Tokens carried in the magic-link redirect fragment
///
/// The fragment looks like
/// `#access_token=…&expires_in=3600&refresh_token=…&token_type=bearer&type=magiclink`.
/// Identity (user id, email) is not in the fragment; the auth adapter
/// resolves it against the user endpoint before persisting a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl RedirectTokens {
    pub fn from_redirect_url(raw: &str) -> Result<Self, CredentialError> {
        let url = Url::parse(raw.trim())
            .map_err(|e| CredentialError::InvalidRedirect(e.to_string()))?;
        let fragment = url
            .fragment()
            .ok_or_else(|| CredentialError::InvalidRedirect("no fragment".to_string()))?;

        let mut access_token = None;
        let mut refresh_token = None;
        let mut expires_in = 3600i64;
        for pair in fragment.split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            match key {
                "access_token" => access_token = Some(value.to_string()),
                "refresh_token" => refresh_token = Some(value.to_string()),
                "expires_in" => {
                    expires_in = value.parse().map_err(|_| {
                        CredentialError::InvalidRedirect(format!("bad expires_in: {value}"))
                    })?;
                }
                _ => {}
            }
        }

        Ok(Self {
            access_token: access_token.ok_or_else(|| {
                CredentialError::InvalidRedirect("missing access_token".to_string())
            })?,
            refresh_token: refresh_token.ok_or_else(|| {
                CredentialError::InvalidRedirect("missing refresh_token".to_string())
            })?,
            expires_in,
        })
    }
}

/// File-backed session persistence
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location under the platform config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("movie-randomizer").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted session, `None` when no one has logged in yet
    pub fn load(&self) -> Result<Option<Session>, CredentialError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    /// Persist a session, replacing whatever was there
    pub fn save(&self, session: &Session) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }

    /// Remove the persisted session, if any
    pub fn clear(&self) -> Result<(), CredentialError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
