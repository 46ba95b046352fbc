//! Embed Script Loading Integration Tests
//!
//! The inject-once invariant across gallery mounts: one script per
//! provider per process, a reprocess per embed mount, and injection
//! failures that degrade only the cards that needed the script.

use braincache::embed::{Provider, ScriptError, ScriptHost, ScriptRegistry};
use braincache::view::Gallery;
use braincache::{ContentItem, ContentKind, EmbedStrategy};

/// Host double recording every call
#[derive(Default)]
struct CountingHost {
    injects: Vec<Provider>,
    reprocesses: Vec<Provider>,
    preloaded: Vec<Provider>,
    failing: Vec<Provider>,
}

impl ScriptHost for CountingHost {
    fn is_present(&self, provider: Provider) -> bool {
        self.preloaded.contains(&provider) || self.injects.contains(&provider)
    }

    fn inject(&mut self, provider: Provider) -> Result<(), ScriptError> {
        if self.failing.contains(&provider) {
            return Err(ScriptError::InjectFailed {
                provider,
                reason: "network down".to_string(),
            });
        }
        self.injects.push(provider);
        Ok(())
    }

    fn reprocess(&mut self, provider: Provider) {
        self.reprocesses.push(provider);
    }
}

fn tweet(id: &str) -> ContentItem {
    ContentItem::new(id, format!("tweet {id}"), ContentKind::Twitter)
        .with_source_url(format!("https://x.com/u/status/{id}"))
}

fn pin(id: &str) -> ContentItem {
    ContentItem::new(id, format!("pin {id}"), ContentKind::Pinterest)
        .with_source_url(format!("https://pinterest.com/pin/{id}/"))
}

#[test]
fn second_card_of_same_provider_does_not_reinject() {
    let mut gallery = Gallery::new(vec![tweet("1"), tweet("2"), tweet("3")], false);
    let mut registry = ScriptRegistry::new();
    let mut host = CountingHost::default();

    gallery.mount(&mut registry, &mut host);

    assert_eq!(host.injects, vec![Provider::Twitter]);
    assert_eq!(host.reprocesses.len(), 3, "one reprocess per mount");
}

#[test]
fn each_provider_gets_its_own_script() {
    let mut gallery = Gallery::new(vec![tweet("1"), pin("100"), tweet("2"), pin("200")], false);
    let mut registry = ScriptRegistry::new();
    let mut host = CountingHost::default();

    gallery.mount(&mut registry, &mut host);

    assert_eq!(host.injects, vec![Provider::Twitter, Provider::Pinterest]);
    assert_eq!(host.reprocesses.len(), 4);
}

#[test]
fn preexisting_script_is_detected_not_reinjected() {
    let mut gallery = Gallery::new(vec![tweet("1")], false);
    let mut registry = ScriptRegistry::new();
    let mut host = CountingHost {
        preloaded: vec![Provider::Twitter],
        ..Default::default()
    };

    gallery.mount(&mut registry, &mut host);

    assert!(host.injects.is_empty());
    assert_eq!(host.reprocesses.len(), 1, "reprocess still runs per mount");
}

#[test]
fn failed_injection_degrades_only_that_provider_cards() {
    let items = vec![tweet("1"), pin("100"), tweet("2")];
    let mut gallery = Gallery::new(items, false);
    let mut registry = ScriptRegistry::new();
    let mut host = CountingHost {
        failing: vec![Provider::Twitter],
        ..Default::default()
    };

    gallery.mount(&mut registry, &mut host);

    // Twitter cards fell back, the pinterest card did not
    assert_eq!(
        gallery.card("1").unwrap().effective_strategy(),
        EmbedStrategy::GenericFallback
    );
    assert_eq!(
        gallery.card("2").unwrap().effective_strategy(),
        EmbedStrategy::GenericFallback
    );
    assert_eq!(
        gallery.card("100").unwrap().effective_strategy(),
        EmbedStrategy::Iframe
    );
    assert_eq!(host.injects, vec![Provider::Pinterest]);
}

#[test]
fn registry_survives_across_galleries_in_one_process() {
    let mut registry = ScriptRegistry::new();
    let mut host = CountingHost::default();

    let mut first = Gallery::new(vec![tweet("1")], false);
    first.mount(&mut registry, &mut host);

    // A second page of results mounts later in the same process
    let mut second = Gallery::new(vec![tweet("2")], false);
    second.mount(&mut registry, &mut host);

    assert_eq!(host.injects, vec![Provider::Twitter]);
    assert_eq!(host.reprocesses.len(), 2);
}
