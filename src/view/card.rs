//! Per-item card: view state, mount effects and rendering dispatch.
//!
//! One card type covers every content kind; the differences live in the
//! classifier's descriptor and the strategy match in the render methods,
//! not in divergent card variants.

use crate::classify::{classify, youtube_thumbnail_url, youtube_watch_url};
use crate::domain::{ContentItem, EmbedDescriptor, EmbedStrategy};
use crate::embed::Provider;

use super::render::{format_size, truncate};

/// The three independent view-state axes of a mounted card.
///
/// `embed_failed` is one-way for the card's mounted lifetime; the other
/// two toggle freely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CardViewState {
    /// Enlarged in the grid
    pub expanded: bool,

    /// A thumbnail/script/iframe load failed; card degrades to fallback
    pub embed_failed: bool,

    /// Detail (enlarged) view open
    pub detail_open: bool,
}

/// View-state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    /// Toggle the expanded axis
    ToggleExpand,

    /// An embed resource failed to load (one-way)
    EmbedFailed,

    /// Open the detail view
    OpenDetail,

    /// Close the detail view
    CloseDetail,
}

impl CardViewState {
    /// Apply a single event. All transitions are valid from every state;
    /// `EmbedFailed` latches.
    pub fn apply(&mut self, event: CardEvent) {
        match event {
            CardEvent::ToggleExpand => self.expanded = !self.expanded,
            CardEvent::EmbedFailed => self.embed_failed = true,
            CardEvent::OpenDetail => self.detail_open = true,
            CardEvent::CloseDetail => self.detail_open = false,
        }
    }
}

/// Side effects a card asks its environment to perform on mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEffect {
    /// Make sure the provider script is loaded (at most once per process)
    EnsureScript(Provider),

    /// Re-run the provider's embed scan for this new mount
    Reprocess(Provider),
}

/// How a documents card obtains its file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadAction {
    /// Open the attachment's direct URL
    Direct(String),

    /// Stream from the repository by item id
    Stream(String),
}

/// A mounted card wrapping one content item.
#[derive(Debug, Clone)]
pub struct Card {
    item: ContentItem,
    state: CardViewState,
    readonly: bool,
}

impl Card {
    /// Mount a card over an item. `readonly` suppresses the delete intent
    /// (shared, read-only galleries).
    pub fn new(item: ContentItem, readonly: bool) -> Self {
        Self {
            item,
            state: CardViewState::default(),
            readonly,
        }
    }

    /// The wrapped item
    pub fn item(&self) -> &ContentItem {
        &self.item
    }

    /// Current view state
    pub fn state(&self) -> CardViewState {
        self.state
    }

    /// Whether delete is suppressed
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// The item's embed descriptor, recomputed on each call.
    ///
    /// Classification is a pure function of the item, so view-state
    /// changes (expand, detail) can never alter it.
    pub fn descriptor(&self) -> EmbedDescriptor {
        classify(&self.item)
    }

    /// Strategy actually used for rendering: the classified strategy, or
    /// the generic fallback once an embed load has failed.
    pub fn effective_strategy(&self) -> EmbedStrategy {
        if self.state.embed_failed {
            EmbedStrategy::GenericFallback
        } else {
            self.descriptor().strategy
        }
    }

    /// Effects to run when this card first renders.
    ///
    /// Only cards whose classified presentation depends on a provider
    /// script (Twitter, Instagram inline embeds; Pinterest iframes) emit
    /// anything; a card already degraded to fallback stays silent.
    pub fn mount_effects(&self) -> Vec<CardEffect> {
        if self.effective_strategy() == EmbedStrategy::GenericFallback {
            return Vec::new();
        }

        match Provider::for_kind(self.item.kind) {
            Some(provider) => vec![
                CardEffect::EnsureScript(provider),
                CardEffect::Reprocess(provider),
            ],
            None => Vec::new(),
        }
    }

    /// Apply a view-state event
    pub fn apply(&mut self, event: CardEvent) {
        self.state.apply(event);
    }

    /// The delete intent, unless this card is readonly.
    ///
    /// The caller owns the repository call; on failure the card stays in
    /// place untouched.
    pub fn request_delete(&self) -> Option<&str> {
        if self.readonly {
            None
        } else {
            Some(&self.item.id)
        }
    }

    /// The download action for a documents card, if any.
    pub fn download_action(&self) -> Option<DownloadAction> {
        if self.descriptor().strategy != EmbedStrategy::FileTile {
            return None;
        }

        match self.item.file.as_ref().and_then(|f| f.download_url.clone()) {
            Some(url) => Some(DownloadAction::Direct(url)),
            None => Some(DownloadAction::Stream(self.item.id.clone())),
        }
    }

    /// Render the card as a gallery tile.
    pub fn render_tile(&self) -> Vec<String> {
        let marker = if self.state.expanded { "▾" } else { "▸" };
        let mut lines = vec![format!(
            "{} [{}] {}",
            marker,
            self.item.kind,
            truncate(&self.item.title, 47)
        )];

        lines.extend(self.render_body());

        if self.state.expanded {
            if let Some(description) = &self.item.description {
                lines.push(format!("    {}", truncate(description, 72)));
            }
        }

        lines
    }

    /// Render the enlarged detail surface.
    ///
    /// Same classifier, bigger presentation: YouTube still shows a
    /// thumbnail that opens externally rather than switching strategy.
    pub fn render_detail(&self) -> Vec<String> {
        let mut lines = vec![
            format!("╔{}", "═".repeat(62)),
            format!("  {}", self.item.title),
            format!("  kind: {}   strategy: {}", self.item.kind, self.effective_strategy()),
        ];

        if let Some(description) = &self.item.description {
            lines.push(String::new());
            lines.push(format!("  {}", description));
        }

        lines.push(String::new());
        for body_line in self.render_body() {
            lines.push(body_line);
        }

        if let Some(url) = &self.item.source_url {
            lines.push(format!("  open link: {}", url));
        }
        if let Some(action) = self.download_action() {
            match action {
                DownloadAction::Direct(url) => lines.push(format!("  download:  {}", url)),
                DownloadAction::Stream(id) => {
                    lines.push(format!("  download:  braincache download {}", id))
                }
            }
        }

        lines.push(format!("╚{}", "═".repeat(62)));
        lines
    }

    /// Strategy-dispatched body shared by tile and detail rendering.
    fn render_body(&self) -> Vec<String> {
        let descriptor = self.descriptor();

        match self.effective_strategy() {
            EmbedStrategy::ThumbnailImage => {
                // resolved_id is always present when this strategy is chosen
                let id = descriptor.resolved_id.unwrap_or_default();
                vec![
                    format!("    thumbnail: {}", youtube_thumbnail_url(&id)),
                    format!("    plays at:  {}", youtube_watch_url(&id)),
                ]
            }
            EmbedStrategy::InlineEmbedScript => {
                let url = descriptor.canonical_url.unwrap_or_default();
                vec![format!("    widget embed: {}", url)]
            }
            EmbedStrategy::Iframe => match (&descriptor.canonical_url, &descriptor.resolved_id) {
                (Some(url), _) => vec![format!("    iframe: {}", url)],
                (None, Some(id)) => vec![format!("    iframe: pin {}", id)],
                (None, None) => Vec::new(),
            },
            EmbedStrategy::FileTile => match &self.item.file {
                Some(file) => vec![format!(
                    "    file: {} ({})",
                    file.name,
                    format_size(file.size_bytes)
                )],
                None => vec!["    document".to_string()],
            },
            EmbedStrategy::LinkTile => {
                let url = descriptor.canonical_url.unwrap_or_default();
                vec![format!("    link: {}", url)]
            }
            EmbedStrategy::GenericFallback => vec!["    no preview available".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContentKind, FileAttachment};

    fn twitter_item() -> ContentItem {
        ContentItem::new("t1", "first tweet", ContentKind::Twitter)
            .with_source_url("https://x.com/someone/status/123")
    }

    #[test]
    fn test_view_state_defaults() {
        let card = Card::new(twitter_item(), false);
        assert_eq!(card.state(), CardViewState::default());
        assert!(!card.state().expanded);
        assert!(!card.state().embed_failed);
        assert!(!card.state().detail_open);
    }

    #[test]
    fn test_expand_toggles_and_detail_opens() {
        let mut card = Card::new(twitter_item(), false);

        card.apply(CardEvent::ToggleExpand);
        assert!(card.state().expanded);
        card.apply(CardEvent::ToggleExpand);
        assert!(!card.state().expanded);

        card.apply(CardEvent::OpenDetail);
        assert!(card.state().detail_open);
        card.apply(CardEvent::CloseDetail);
        assert!(!card.state().detail_open);
    }

    #[test]
    fn test_embed_failed_latches() {
        let mut card = Card::new(twitter_item(), false);
        card.apply(CardEvent::EmbedFailed);
        assert!(card.state().embed_failed);
        assert_eq!(card.effective_strategy(), EmbedStrategy::GenericFallback);

        // No event un-fails an embed within a mount
        card.apply(CardEvent::ToggleExpand);
        card.apply(CardEvent::CloseDetail);
        assert!(card.state().embed_failed);
    }

    #[test]
    fn test_expand_never_changes_descriptor() {
        let mut card = Card::new(twitter_item(), false);
        let before = card.descriptor();
        card.apply(CardEvent::ToggleExpand);
        assert_eq!(card.descriptor(), before);
        card.apply(CardEvent::ToggleExpand);
        assert_eq!(card.descriptor(), before);
    }

    #[test]
    fn test_mount_effects_for_provider_kinds() {
        let card = Card::new(twitter_item(), false);
        assert_eq!(
            card.mount_effects(),
            vec![
                CardEffect::EnsureScript(Provider::Twitter),
                CardEffect::Reprocess(Provider::Twitter),
            ]
        );

        let youtube = Card::new(
            ContentItem::new("y1", "video", ContentKind::YouTube)
                .with_source_url("https://youtu.be/p2j6Wq57MEE"),
            false,
        );
        assert!(youtube.mount_effects().is_empty());

        // A pinterest card that classified to fallback loads nothing
        let broken = Card::new(
            ContentItem::new("p1", "pin", ContentKind::Pinterest)
                .with_source_url("https://pinterest.com/other/"),
            false,
        );
        assert!(broken.mount_effects().is_empty());
    }

    #[test]
    fn test_readonly_suppresses_delete() {
        let card = Card::new(twitter_item(), true);
        assert_eq!(card.request_delete(), None);

        let card = Card::new(twitter_item(), false);
        assert_eq!(card.request_delete(), Some("t1"));
    }

    #[test]
    fn test_download_action_prefers_direct_url() {
        let with_url = Card::new(
            ContentItem::new("d1", "doc", ContentKind::Documents).with_file(FileAttachment {
                name: "a.pdf".to_string(),
                size_bytes: 2048,
                download_url: Some("https://files.example/a.pdf".to_string()),
            }),
            false,
        );
        assert_eq!(
            with_url.download_action(),
            Some(DownloadAction::Direct("https://files.example/a.pdf".to_string()))
        );

        let without_url = Card::new(
            ContentItem::new("d2", "doc", ContentKind::Documents).with_file(FileAttachment {
                name: "b.pdf".to_string(),
                size_bytes: 1024,
                download_url: None,
            }),
            false,
        );
        assert_eq!(
            without_url.download_action(),
            Some(DownloadAction::Stream("d2".to_string()))
        );

        let tweet = Card::new(twitter_item(), false);
        assert_eq!(tweet.download_action(), None);
    }

    #[test]
    fn test_tile_renders_canonical_twitter_url() {
        let card = Card::new(twitter_item(), false);
        let tile = card.render_tile().join("\n");
        assert!(tile.contains("twitter.com/someone/status/123"));
        assert!(!tile.contains("x.com"));
    }

    #[test]
    fn test_failed_card_renders_fallback_tile() {
        let mut card = Card::new(twitter_item(), false);
        card.apply(CardEvent::EmbedFailed);
        let tile = card.render_tile().join("\n");
        assert!(tile.contains("no preview available"));
    }
}
