//! Gallery Integration Tests
//!
//! End-to-end scenario from the card gallery's contract: five mixed
//! items classify independently, deletes remove exactly one card, and
//! view-state changes never touch classification.

use braincache::embed::{HeadlessHost, ScriptRegistry};
use braincache::view::{CardEvent, Gallery};
use braincache::{ContentItem, ContentKind, EmbedStrategy, FileAttachment};

/// The five-card mixed gallery: valid youtube, broken youtube, twitter,
/// file-only documents, url-less other.
fn mixed_items() -> Vec<ContentItem> {
    vec![
        ContentItem::new("yt-ok", "good video", ContentKind::YouTube)
            .with_source_url("https://www.youtube.com/watch?v=p2j6Wq57MEE"),
        ContentItem::new("yt-bad", "broken video", ContentKind::YouTube)
            .with_source_url("https://www.youtube.com/watch?v=oops"),
        ContentItem::new("tw", "a tweet", ContentKind::Twitter)
            .with_source_url("https://x.com/someone/status/1931409506245980404"),
        ContentItem::new("doc", "my notes", ContentKind::Documents).with_file(FileAttachment {
            name: "notes.pdf".to_string(),
            size_bytes: 20480,
            download_url: None,
        }),
        ContentItem::new("oth", "mystery", ContentKind::Other),
    ]
}

#[test]
fn mixed_gallery_classifies_each_card_independently() {
    let gallery = Gallery::new(mixed_items(), false);

    let strategies: Vec<EmbedStrategy> = gallery
        .cards()
        .iter()
        .map(|c| c.effective_strategy())
        .collect();

    assert_eq!(
        strategies,
        vec![
            EmbedStrategy::ThumbnailImage,
            EmbedStrategy::GenericFallback,
            EmbedStrategy::InlineEmbedScript,
            EmbedStrategy::FileTile,
            EmbedStrategy::GenericFallback,
        ]
    );
}

#[test]
fn deleting_one_card_leaves_the_others_untouched() {
    let mut gallery = Gallery::new(mixed_items(), false);

    let before: Vec<_> = gallery
        .cards()
        .iter()
        .filter(|c| c.item().id != "tw")
        .map(|c| (c.item().id.clone(), c.descriptor()))
        .collect();

    // The card itself authorizes the delete, the gallery removes it
    let intent = gallery.card("tw").unwrap().request_delete().unwrap().to_string();
    let removed = gallery.remove(&intent).unwrap();
    assert_eq!(removed.item().id, "tw");
    assert_eq!(gallery.len(), 4);

    let after: Vec<_> = gallery
        .cards()
        .iter()
        .map(|c| (c.item().id.clone(), c.descriptor()))
        .collect();

    assert_eq!(before, after, "surviving descriptors must be unchanged");
}

#[test]
fn expand_toggle_never_changes_descriptors() {
    let mut gallery = Gallery::new(mixed_items(), false);

    let before: Vec<_> = gallery.cards().iter().map(|c| c.descriptor()).collect();

    for item_id in ["yt-ok", "yt-bad", "tw", "doc", "oth"] {
        let card = gallery.card_mut(item_id).unwrap();
        card.apply(CardEvent::ToggleExpand);
    }

    let after: Vec<_> = gallery.cards().iter().map(|c| c.descriptor()).collect();
    assert_eq!(before, after);
}

#[test]
fn embed_failure_is_local_to_one_card() {
    let mut gallery = Gallery::new(mixed_items(), false);

    gallery
        .card_mut("yt-ok")
        .unwrap()
        .apply(CardEvent::EmbedFailed);

    assert_eq!(
        gallery.card("yt-ok").unwrap().effective_strategy(),
        EmbedStrategy::GenericFallback
    );
    // Siblings keep their classified presentation
    assert_eq!(
        gallery.card("tw").unwrap().effective_strategy(),
        EmbedStrategy::InlineEmbedScript
    );
    assert_eq!(
        gallery.card("doc").unwrap().effective_strategy(),
        EmbedStrategy::FileTile
    );
}

#[test]
fn readonly_gallery_suppresses_every_delete() {
    let mut gallery = Gallery::new(mixed_items(), true);
    let mut registry = ScriptRegistry::new();
    let mut host = HeadlessHost::new();
    gallery.mount(&mut registry, &mut host);

    assert!(gallery.is_readonly());
    for card in gallery.cards() {
        assert_eq!(card.request_delete(), None);
    }
}

#[test]
fn kind_filter_matches_sidebar_behavior() {
    let gallery = Gallery::new(mixed_items(), false);

    assert_eq!(gallery.filter_by_kind(ContentKind::YouTube).len(), 2);
    assert_eq!(gallery.filter_by_kind(ContentKind::Twitter).len(), 1);
    assert_eq!(gallery.filter_by_kind(ContentKind::Pinterest).len(), 0);

    let rendered = gallery.render(Some(ContentKind::Documents));
    assert!(rendered.contains("my notes"));
    assert!(!rendered.contains("a tweet"));
}
