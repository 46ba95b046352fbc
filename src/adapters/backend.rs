//! REST client for the BrainCache backend.
//!
//! Thin reqwest wrapper over the backend's JSON API. Auth is an opaque
//! bearer token; a missing or rejected token surfaces as
//! `RepositoryError::Unauthorized` so callers can render "please sign
//! in" instead of crashing.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::domain::{ContentItem, ContentKind};

use super::ContentRepository;

/// Errors from the content repository boundary
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not signed in. Run 'braincache signin' first.")]
    Unauthorized,

    #[error("Backend error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Could not read attachment: {0}")]
    Attachment(#[from] std::io::Error),
}

/// Fields for creating a new item
#[derive(Debug, Clone)]
pub struct ContentDraft {
    pub title: String,
    pub kind: ContentKind,
    pub link: Option<String>,
    pub description: Option<String>,
    /// Local file to upload (documents kind)
    pub file_path: Option<PathBuf>,
}

/// A shared brain: someone else's read-only content list
#[derive(Debug, Clone, Deserialize)]
pub struct SharedBrain {
    pub username: String,
    pub content: Vec<ContentItem>,
}

/// Generic error payload the backend attaches to failures
#[derive(Debug, Deserialize)]
struct MessageEnvelope {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ContentsEnvelope {
    #[serde(default)]
    contents: Vec<ContentItem>,
}

#[derive(Debug, Deserialize)]
struct CreatedEnvelope {
    content: ContentItem,
}

#[derive(Debug, Deserialize)]
struct ShareEnvelope {
    hash: String,
}

#[derive(Debug, Deserialize)]
struct TokenEnvelope {
    token: String,
}

/// BrainCache backend API client
pub struct BackendClient {
    /// Base URL, no trailing slash
    base_url: String,
    /// Bearer token, absent before sign-in
    token: Option<String>,
    /// HTTP client
    client: reqwest::Client,
}

impl BackendClient {
    /// Create a client against a backend
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            client: reqwest::Client::new(),
        }
    }

    /// Build API URL
    fn api_url(&self, path: &str) -> String {
        format!("{}/api/v1/{}", self.base_url, path)
    }

    /// Attach the bearer token, or fail early when there is none
    fn authed(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, RepositoryError> {
        match &self.token {
            Some(token) => Ok(request.bearer_auth(token)),
            None => Err(RepositoryError::Unauthorized),
        }
    }

    /// Map a non-success response to a repository error
    async fn error_for(response: reqwest::Response) -> RepositoryError {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return RepositoryError::Unauthorized;
        }

        let message = response
            .json::<MessageEnvelope>()
            .await
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        RepositoryError::Api {
            status: status.as_u16(),
            message,
        }
    }

    /// Sign in and return the issued token
    pub async fn signin(&self, username: &str, password: &str) -> Result<String, RepositoryError> {
        self.credentials_request("signin", username, password).await
    }

    /// Create an account and return the issued token
    pub async fn signup(&self, username: &str, password: &str) -> Result<String, RepositoryError> {
        self.credentials_request("signup", username, password).await
    }

    async fn credentials_request(
        &self,
        endpoint: &str,
        username: &str,
        password: &str,
    ) -> Result<String, RepositoryError> {
        let response = self
            .client
            .post(self.api_url(endpoint))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let envelope: TokenEnvelope = response.json().await?;
        Ok(envelope.token)
    }
}

#[async_trait]
impl ContentRepository for BackendClient {
    async fn list(&self) -> Result<Vec<ContentItem>, RepositoryError> {
        let request = self.authed(self.client.get(self.api_url("content")))?;
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let envelope: ContentsEnvelope = response.json().await?;
        debug!(count = envelope.contents.len(), "fetched content list");
        Ok(envelope.contents)
    }

    async fn create(&self, draft: ContentDraft) -> Result<ContentItem, RepositoryError> {
        let request = self.authed(self.client.post(self.api_url("content")))?;

        let request = if let Some(path) = &draft.file_path {
            // Attachment uploads go as multipart; metadata rides along as
            // plain text fields.
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "attachment".to_string());
            let bytes = tokio::fs::read(path).await?;

            let mut form = reqwest::multipart::Form::new()
                .text("title", draft.title.clone())
                .text("type", draft.kind.to_string())
                .part(
                    "file",
                    reqwest::multipart::Part::bytes(bytes).file_name(file_name),
                );
            if let Some(link) = &draft.link {
                form = form.text("link", link.clone());
            }
            if let Some(description) = &draft.description {
                form = form.text("description", description.clone());
            }

            request.multipart(form)
        } else {
            request.json(&serde_json::json!({
                "title": draft.title,
                "type": draft.kind.to_string(),
                "link": draft.link,
                "description": draft.description,
            }))
        };

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let envelope: CreatedEnvelope = response.json().await?;
        Ok(envelope.content)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let request = self.authed(self.client.delete(self.api_url("content")))?;
        let response = request
            .json(&serde_json::json!({ "contentId": id }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        Ok(())
    }

    async fn download_stream(&self, id: &str) -> Result<Vec<u8>, RepositoryError> {
        let request = self.authed(
            self.client
                .get(self.api_url(&format!("content/{}/download", id))),
        )?;
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        Ok(response.bytes().await?.to_vec())
    }

    async fn create_share_link(&self) -> Result<String, RepositoryError> {
        let request = self.authed(self.client.post(self.api_url("brain/share")))?;
        let response = request
            .json(&serde_json::json!({ "share": true }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        let envelope: ShareEnvelope = response.json().await?;
        Ok(format!("{}/brain/{}", self.base_url, envelope.hash))
    }

    async fn shared_brain(&self, hash: &str) -> Result<SharedBrain, RepositoryError> {
        // Public route, no auth header
        let response = self
            .client
            .get(self.api_url(&format!("brain/{}", hash)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_for(response).await);
        }

        Ok(response.json().await?)
    }
}
