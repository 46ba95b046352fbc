//! The card gallery: one mounted card per fetched item.
//!
//! The gallery owns card lifecycle (mount effects, removal after a
//! confirmed delete) and the kind filter the sidebar drives. It never
//! talks to the network itself; repository calls stay with the caller.

use tracing::warn;

use crate::domain::{ContentItem, ContentKind};
use crate::embed::{ScriptHost, ScriptRegistry};

use super::card::{Card, CardEffect, CardEvent};

/// A list of mounted cards over one content listing.
#[derive(Debug)]
pub struct Gallery {
    cards: Vec<Card>,
    readonly: bool,
}

impl Gallery {
    /// Mount a card for every item. `readonly` galleries (shared views)
    /// suppress delete on every card.
    pub fn new(items: Vec<ContentItem>, readonly: bool) -> Self {
        Self {
            cards: items.into_iter().map(|i| Card::new(i, readonly)).collect(),
            readonly,
        }
    }

    /// Whether this gallery is a read-only shared view
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Number of mounted cards
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the gallery is empty
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// All cards, in listing order
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card by item id
    pub fn card(&self, id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.item().id == id)
    }

    /// Mutable card by item id
    pub fn card_mut(&mut self, id: &str) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.item().id == id)
    }

    /// Cards surviving the sidebar's kind filter
    pub fn filter_by_kind(&self, kind: ContentKind) -> Vec<&Card> {
        self.cards
            .iter()
            .filter(|c| c.item().kind == kind)
            .collect()
    }

    /// Run every card's mount effects through the script registry.
    ///
    /// A failed script injection degrades only the cards that asked for
    /// that provider; every other card keeps its classified presentation.
    pub fn mount(&mut self, registry: &mut ScriptRegistry, host: &mut dyn ScriptHost) {
        for card in &mut self.cards {
            for effect in card.mount_effects() {
                match effect {
                    CardEffect::EnsureScript(provider) => {
                        if let Err(err) = registry.ensure_ready(provider, host) {
                            warn!(%provider, "embed script load failed: {err}");
                            card.apply(CardEvent::EmbedFailed);
                        }
                    }
                    CardEffect::Reprocess(provider) => {
                        registry.reprocess(provider, host);
                    }
                }
            }
        }
    }

    /// Remove the card for a successfully deleted item.
    ///
    /// Returns the removed card; siblings are untouched.
    pub fn remove(&mut self, id: &str) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.item().id == id)?;
        Some(self.cards.remove(pos))
    }

    /// Render the gallery as text, optionally filtered by kind.
    pub fn render(&self, filter: Option<ContentKind>) -> String {
        let cards: Vec<&Card> = match filter {
            Some(kind) => self.filter_by_kind(kind),
            None => self.cards.iter().collect(),
        };

        if cards.is_empty() {
            return "No saved content yet. Use 'braincache add' to save your first link.\n"
                .to_string();
        }

        let mut out = String::new();
        for card in cards {
            for line in card.render_tile() {
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmbedStrategy;

    fn items() -> Vec<ContentItem> {
        vec![
            ContentItem::new("1", "video", ContentKind::YouTube)
                .with_source_url("https://youtu.be/p2j6Wq57MEE"),
            ContentItem::new("2", "tweet", ContentKind::Twitter)
                .with_source_url("https://x.com/a/status/9"),
            ContentItem::new("3", "pin", ContentKind::Pinterest)
                .with_source_url("https://pinterest.com/pin/55512/"),
        ]
    }

    #[test]
    fn test_filter_by_kind() {
        let gallery = Gallery::new(items(), false);
        assert_eq!(gallery.len(), 3);
        assert_eq!(gallery.filter_by_kind(ContentKind::Twitter).len(), 1);
        assert_eq!(gallery.filter_by_kind(ContentKind::Documents).len(), 0);
    }

    #[test]
    fn test_remove_leaves_siblings() {
        let mut gallery = Gallery::new(items(), false);
        let removed = gallery.remove("2").unwrap();
        assert_eq!(removed.item().id, "2");
        assert_eq!(gallery.len(), 2);
        assert!(gallery.card("1").is_some());
        assert!(gallery.card("3").is_some());
        assert!(gallery.remove("2").is_none());
    }

    #[test]
    fn test_readonly_gallery_cards_are_readonly() {
        let gallery = Gallery::new(items(), true);
        assert!(gallery.cards().iter().all(|c| c.request_delete().is_none()));
    }

    #[test]
    fn test_render_empty_state() {
        let gallery = Gallery::new(Vec::new(), false);
        assert!(gallery.render(None).contains("No saved content"));
    }

    #[test]
    fn test_render_respects_filter() {
        let gallery = Gallery::new(items(), false);
        let only_pins = gallery.render(Some(ContentKind::Pinterest));
        assert!(only_pins.contains("pin"));
        assert!(!only_pins.contains("tweet"));
    }

    #[test]
    fn test_strategies_in_listing_order() {
        let gallery = Gallery::new(items(), false);
        let strategies: Vec<EmbedStrategy> = gallery
            .cards()
            .iter()
            .map(|c| c.effective_strategy())
            .collect();
        assert_eq!(
            strategies,
            vec![
                EmbedStrategy::ThumbnailImage,
                EmbedStrategy::InlineEmbedScript,
                EmbedStrategy::Iframe,
            ]
        );
    }
}
