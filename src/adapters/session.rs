//! On-disk session store.
//!
//! The CLI equivalent of the browser's localStorage token slot: one JSON
//! file under the braincache home. The token itself stays opaque and
//! backend-issued.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// A signed-in session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer token issued by the backend
    pub token: String,

    /// Username the token was issued for
    pub username: String,

    /// When the token was stored locally
    pub issued_at: DateTime<Utc>,
}

impl Session {
    /// Create a session stamped with the current time
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            username: username.into(),
            issued_at: Utc::now(),
        }
    }
}

/// Stores the session file
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store at an explicit path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store at the configured default location
    pub fn open_default() -> Result<Self> {
        Ok(Self::new(crate::config::token_path()?))
    }

    /// Persist a session
    pub async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, content)
            .await
            .with_context(|| format!("Failed to write session: {}", self.path.display()))?;

        Ok(())
    }

    /// Load the stored session, if any
    pub async fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read session: {}", self.path.display()))?;

        let session = serde_json::from_str(&content).context("Failed to parse session JSON")?;
        Ok(Some(session))
    }

    /// The stored token, if signed in
    pub async fn token(&self) -> Result<Option<String>> {
        Ok(self.load().await?.map(|s| s.token))
    }

    /// Delete the session file (sign out)
    pub async fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .await
                .with_context(|| format!("Failed to remove session: {}", self.path.display()))?;
        }
        Ok(())
    }
}
