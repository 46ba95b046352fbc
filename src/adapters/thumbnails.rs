//! Thumbnail fetching and caching for thumbnail-image cards.
//!
//! Thumbnails are cached on disk keyed by SHA256(url)[0:16], so repeat
//! detail views never refetch. A failed fetch is the concrete
//! embed-load-failure path: the owning card flips to its fallback tile,
//! nothing else is affected.

use std::path::PathBuf;

use sha2::{Digest, Sha256};
use thiserror::Error;
use tokio::fs;
use tracing::debug;

/// Errors from thumbnail fetching
#[derive(Debug, Error)]
pub enum ThumbnailError {
    #[error("Thumbnail unavailable (HTTP {status})")]
    Unavailable { status: u16 },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Cache IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Cache key for a thumbnail URL (SHA256(url)[0:16])
pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let result = hasher.finalize();

    result[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

/// Disk-backed thumbnail cache
pub struct ThumbnailCache {
    dir: PathBuf,
    client: reqwest::Client,
}

impl ThumbnailCache {
    /// Cache under an explicit directory
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            client: reqwest::Client::new(),
        }
    }

    /// Cache under the configured thumbnails directory
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self::new(crate::config::thumbnails_dir()?))
    }

    /// Path a URL's thumbnail is cached at
    pub fn cached_path(&self, url: &str) -> PathBuf {
        self.dir.join(format!("{}.jpg", cache_key(url)))
    }

    /// Fetch a thumbnail, returning the cached file path.
    ///
    /// Cache hits never touch the network.
    pub async fn fetch(&self, url: &str) -> Result<PathBuf, ThumbnailError> {
        let path = self.cached_path(url);
        if path.exists() {
            debug!(path = %path.display(), "thumbnail cache hit");
            return Ok(path);
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ThumbnailError::Unavailable {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        fs::create_dir_all(&self.dir).await?;
        fs::write(&path, &bytes).await?;

        debug!(path = %path.display(), size = bytes.len(), "thumbnail cached");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_is_stable_and_short() {
        let a = cache_key("https://img.youtube.com/vi/p2j6Wq57MEE/hqdefault.jpg");
        let b = cache_key("https://img.youtube.com/vi/p2j6Wq57MEE/hqdefault.jpg");
        let c = cache_key("https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16); // 8 bytes = 16 hex chars
    }

    #[test]
    fn test_cached_path_layout() {
        let cache = ThumbnailCache::new(PathBuf::from("/tmp/thumbs"));
        let path = cache.cached_path("https://example.com/a.jpg");
        assert!(path.starts_with("/tmp/thumbs"));
        assert!(path.to_string_lossy().ends_with(".jpg"));
    }
}
