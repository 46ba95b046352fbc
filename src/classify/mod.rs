//! Content classification: from `(kind, source_url)` to an embed decision.
//!
//! Every function here is pure and total. Malformed or unrecognized URLs
//! never error out of the classifier; they degrade to the
//! `generic-fallback` strategy so a single bad link can never take down
//! the caller's render pass.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::domain::{ContentItem, ContentKind, EmbedDescriptor};

/// Known YouTube URL shapes: watch?v=, youtu.be/, embed/, v/, u/<char>/,
/// and watch?...&v=. The capture stops at `#`, `&` or `?`.
fn youtube_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:youtu\.be/|youtube\.com/(?:v/|u/\w/|embed/|shorts/|watch\?v=|watch\?.+&v=))([^#&?]*)")
            .unwrap()
    })
}

fn linkedin_activity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"activity-(\d+)").unwrap())
}

fn pinterest_pin_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"pin/(\d+)").unwrap())
}

/// Extract the 11-character video id from a YouTube URL.
///
/// A match of any other length is rejected; 11 characters is the fixed
/// length of a YouTube video id, and partial matches from malformed URLs
/// must not produce a bogus embed.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    let captures = youtube_re().captures(url)?;
    let id = captures.get(1)?.as_str();

    if id.len() == 11 {
        Some(id.to_string())
    } else {
        None
    }
}

/// Rewrite an `x.com` URL to its `twitter.com` equivalent.
///
/// The Twitter widget script only resolves `twitter.com` permalinks.
/// Unparseable input and non-x.com hosts pass through unchanged, which
/// also makes the function idempotent.
pub fn canonicalize_twitter_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };

    let new_host = match parsed.host_str() {
        Some("x.com") => "twitter.com",
        Some("www.x.com") => "www.twitter.com",
        Some("mobile.x.com") => "mobile.twitter.com",
        _ => return url.to_string(),
    };

    if parsed.set_host(Some(new_host)).is_err() {
        return url.to_string();
    }

    parsed.to_string()
}

/// Resolve a LinkedIn post URL to an embeddable URL.
///
/// URLs already pointing at `linkedin.com/embed` pass through unchanged.
/// Otherwise the numeric `activity-<digits>` segment of a post permalink
/// is lifted into the share-embed form. Returns `None` when neither shape
/// matches.
pub fn resolve_linkedin_embed(url: &str) -> Option<String> {
    if let Ok(parsed) = Url::parse(url) {
        let is_linkedin = parsed
            .host_str()
            .is_some_and(|h| h == "linkedin.com" || h.ends_with(".linkedin.com"));
        if is_linkedin && parsed.path().starts_with("/embed") {
            return Some(url.to_string());
        }
    }

    let digits = linkedin_activity_re().captures(url)?.get(1)?.as_str();
    Some(format!(
        "https://www.linkedin.com/embed/feed/update/urn:li:share:{}",
        digits
    ))
}

/// Extract the numeric pin id following `pin/` in a Pinterest URL.
pub fn extract_pinterest_id(url: &str) -> Option<String> {
    pinterest_pin_re()
        .captures(url)?
        .get(1)
        .map(|m| m.as_str().to_string())
}

/// Classify one item into an embed descriptor.
///
/// Dispatches on the item's kind; each arm either produces the kind's
/// nominal strategy or degrades to `generic-fallback`. Total over the
/// input domain: this function never errors and never panics.
pub fn classify(item: &ContentItem) -> EmbedDescriptor {
    let nominal = item.kind.nominal_strategy();

    match (item.kind, item.source_url.as_deref()) {
        // Documents render file metadata (or a generic document icon)
        // whether or not a URL is present.
        (ContentKind::Documents, Some(url)) => EmbedDescriptor::bare(nominal).with_url(url),
        (ContentKind::Documents, None) => EmbedDescriptor::bare(nominal),

        // Every other kind needs a URL to produce an embed
        (_, None) => EmbedDescriptor::generic_fallback(),

        (ContentKind::YouTube, Some(url)) => match extract_youtube_id(url) {
            Some(id) => EmbedDescriptor::bare(nominal).with_id(id),
            None => EmbedDescriptor::generic_fallback(),
        },
        (ContentKind::Twitter, Some(url)) => {
            EmbedDescriptor::bare(nominal).with_url(canonicalize_twitter_url(url))
        }
        (ContentKind::Instagram, Some(url)) => EmbedDescriptor::bare(nominal).with_url(url),
        (ContentKind::LinkedIn, Some(url)) => match resolve_linkedin_embed(url) {
            Some(embed_url) => EmbedDescriptor::bare(nominal).with_url(embed_url),
            None => EmbedDescriptor::generic_fallback(),
        },
        (ContentKind::Pinterest, Some(url)) => match extract_pinterest_id(url) {
            Some(id) => EmbedDescriptor::bare(nominal).with_id(id),
            None => EmbedDescriptor::generic_fallback(),
        },
        (ContentKind::Other, Some(url)) => EmbedDescriptor::bare(nominal).with_url(url),
    }
}

/// Public thumbnail URL for a resolved YouTube video id.
pub fn youtube_thumbnail_url(video_id: &str) -> String {
    format!("https://img.youtube.com/vi/{}/hqdefault.jpg", video_id)
}

/// External watch URL for a resolved YouTube video id.
pub fn youtube_watch_url(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}
