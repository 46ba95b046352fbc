//! Embed descriptors derived from saved items.
//!
//! A descriptor is recomputed on every render from `(kind, source_url)`;
//! it has no lifecycle of its own and is never persisted.

use serde::{Deserialize, Serialize};

use super::content::ContentKind;

/// How a card presents its item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmbedStrategy {
    /// Static thumbnail image (YouTube); opens externally on click
    ThumbnailImage,

    /// Third-party widget script rendered inline (Twitter, Instagram)
    InlineEmbedScript,

    /// Provider iframe (LinkedIn, Pinterest)
    Iframe,

    /// File metadata tile with a download action
    FileTile,

    /// Plain outbound link tile
    LinkTile,

    /// Non-interactive tile shown when nothing richer can be produced
    GenericFallback,
}

impl std::fmt::Display for EmbedStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbedStrategy::ThumbnailImage => write!(f, "thumbnail-image"),
            EmbedStrategy::InlineEmbedScript => write!(f, "inline-embed-script"),
            EmbedStrategy::Iframe => write!(f, "iframe"),
            EmbedStrategy::FileTile => write!(f, "file-tile"),
            EmbedStrategy::LinkTile => write!(f, "link-tile"),
            EmbedStrategy::GenericFallback => write!(f, "generic-fallback"),
        }
    }
}

impl ContentKind {
    /// The strategy this kind uses when classification succeeds.
    ///
    /// This is the single rendering-strategy lookup table; the classifier
    /// decides per item whether the nominal strategy actually applies or
    /// the card degrades to `GenericFallback`.
    pub fn nominal_strategy(self) -> EmbedStrategy {
        match self {
            ContentKind::YouTube => EmbedStrategy::ThumbnailImage,
            ContentKind::Twitter => EmbedStrategy::InlineEmbedScript,
            ContentKind::Instagram => EmbedStrategy::InlineEmbedScript,
            ContentKind::LinkedIn => EmbedStrategy::Iframe,
            ContentKind::Pinterest => EmbedStrategy::Iframe,
            ContentKind::Documents => EmbedStrategy::FileTile,
            ContentKind::Other => EmbedStrategy::LinkTile,
        }
    }
}

/// Result of classifying one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedDescriptor {
    /// Chosen rendering strategy
    pub strategy: EmbedStrategy,

    /// Platform identifier extracted from the URL (video id, pin id)
    pub resolved_id: Option<String>,

    /// Normalized URL suitable for embedding
    pub canonical_url: Option<String>,
}

impl EmbedDescriptor {
    /// Descriptor with a strategy and nothing resolved
    pub fn bare(strategy: EmbedStrategy) -> Self {
        Self {
            strategy,
            resolved_id: None,
            canonical_url: None,
        }
    }

    /// The fallback descriptor used whenever classification misses
    pub fn generic_fallback() -> Self {
        Self::bare(EmbedStrategy::GenericFallback)
    }

    /// Set the resolved platform id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.resolved_id = Some(id.into());
        self
    }

    /// Set the canonical embed URL
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.canonical_url = Some(url.into());
        self
    }
}
