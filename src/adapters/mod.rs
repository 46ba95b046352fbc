//! Adapters for external collaborators.
//!
//! The core only knows contracts: the backend content repository (REST),
//! the on-disk session store, and the thumbnail fetcher. Schemas and
//! token lifecycle stay on the other side of these seams.

pub mod backend;
pub mod session;
pub mod thumbnails;

use async_trait::async_trait;

use crate::domain::ContentItem;

pub use backend::{BackendClient, ContentDraft, RepositoryError, SharedBrain};
pub use session::{Session, SessionStore};
pub use thumbnails::{ThumbnailCache, ThumbnailError};

/// Contract of the backend content repository.
///
/// Every operation is independent; deletes are idempotent at this
/// boundary (an already-deleted id is reported, not fatal).
#[async_trait]
pub trait ContentRepository: Send + Sync {
    /// Fetch the signed-in user's content list
    async fn list(&self) -> Result<Vec<ContentItem>, RepositoryError>;

    /// Create a new item
    async fn create(&self, draft: ContentDraft) -> Result<ContentItem, RepositoryError>;

    /// Delete an item by id
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;

    /// Stream an attached file's bytes by item id
    async fn download_stream(&self, id: &str) -> Result<Vec<u8>, RepositoryError>;

    /// Create (or return) the public share link for this brain
    async fn create_share_link(&self) -> Result<String, RepositoryError>;

    /// Fetch a shared brain by its hash (no auth)
    async fn shared_brain(&self, hash: &str) -> Result<SharedBrain, RepositoryError>;
}
