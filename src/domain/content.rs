//! Saved content items and their declared kinds.
//!
//! Items are owned by the backend; this crate consumes them read-only.

use serde::{Deserialize, Serialize};

/// The closed set of content kinds a user can declare at creation time.
///
/// `kind` is immutable for the life of an item, so everything derived from
/// it (embed strategy, provider script) is a pure function of
/// `(kind, source_url)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// YouTube video
    YouTube,

    /// Twitter/X post
    Twitter,

    /// Instagram post
    Instagram,

    /// LinkedIn post
    LinkedIn,

    /// Pinterest pin
    Pinterest,

    /// Uploaded document (file and/or link)
    Documents,

    /// Anything else with a URL
    Other,
}

impl ContentKind {
    /// All kinds, in sidebar/filter display order.
    pub const ALL: [ContentKind; 7] = [
        ContentKind::YouTube,
        ContentKind::Twitter,
        ContentKind::Instagram,
        ContentKind::LinkedIn,
        ContentKind::Pinterest,
        ContentKind::Documents,
        ContentKind::Other,
    ];
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::YouTube => write!(f, "youtube"),
            ContentKind::Twitter => write!(f, "twitter"),
            ContentKind::Instagram => write!(f, "instagram"),
            ContentKind::LinkedIn => write!(f, "linkedin"),
            ContentKind::Pinterest => write!(f, "pinterest"),
            ContentKind::Documents => write!(f, "documents"),
            ContentKind::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for ContentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "youtube" | "yt" => Ok(ContentKind::YouTube),
            "twitter" | "x" => Ok(ContentKind::Twitter),
            "instagram" | "ig" => Ok(ContentKind::Instagram),
            "linkedin" => Ok(ContentKind::LinkedIn),
            "pinterest" => Ok(ContentKind::Pinterest),
            "documents" | "document" | "doc" => Ok(ContentKind::Documents),
            "other" => Ok(ContentKind::Other),
            _ => anyhow::bail!("Unknown content kind: {}", s),
        }
    }
}

/// Metadata for a file attached to a `documents` item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileAttachment {
    /// Original file name
    pub name: String,

    /// Size in bytes
    #[serde(default)]
    pub size_bytes: u64,

    /// Direct download URL, if the backend exposes one.
    /// Absent means the file must be streamed by item id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

/// A single saved item, as returned by the backend.
///
/// Invariant: a `documents` item has `source_url` or `file` present (not
/// necessarily both); every other kind needs `source_url` to render an
/// embed and falls back to a generic tile without one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Opaque stable identifier assigned by the backend
    #[serde(rename = "_id", alias = "id")]
    pub id: String,

    /// Display title, required
    pub title: String,

    /// Declared content kind
    #[serde(rename = "type")]
    pub kind: ContentKind,

    /// Source URL (called `link` on the wire)
    #[serde(rename = "link", default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Attached file metadata, for `documents` items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileAttachment>,
}

impl ContentItem {
    /// Create an item with just the required fields
    pub fn new(id: impl Into<String>, title: impl Into<String>, kind: ContentKind) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind,
            source_url: None,
            description: None,
            file: None,
        }
    }

    /// Set the source URL
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = Some(url.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach file metadata
    pub fn with_file(mut self, file: FileAttachment) -> Self {
        self.file = Some(file);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!(
            "youtube".parse::<ContentKind>().unwrap(),
            ContentKind::YouTube
        );
        assert_eq!("x".parse::<ContentKind>().unwrap(), ContentKind::Twitter);
        assert_eq!(
            "Documents".parse::<ContentKind>().unwrap(),
            ContentKind::Documents
        );
        assert!("tiktok".parse::<ContentKind>().is_err());
    }

    #[test]
    fn test_kind_display_round_trip() {
        for kind in ContentKind::ALL {
            let parsed: ContentKind = kind.to_string().parse().unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn test_item_wire_format() {
        // The backend sends Mongo-style `_id`, `link` and `type` fields
        let json = r#"{
            "_id": "665f1c2ab8",
            "title": "first tweet",
            "type": "twitter",
            "link": "https://x.com/someone/status/123"
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "665f1c2ab8");
        assert_eq!(item.kind, ContentKind::Twitter);
        assert_eq!(
            item.source_url.as_deref(),
            Some("https://x.com/someone/status/123")
        );
        assert!(item.file.is_none());
    }

    #[test]
    fn test_file_only_document() {
        let json = r#"{
            "_id": "a1",
            "title": "notes",
            "type": "documents",
            "file": {"name": "notes.pdf", "size_bytes": 20480}
        }"#;

        let item: ContentItem = serde_json::from_str(json).unwrap();
        assert!(item.source_url.is_none());
        let file = item.file.unwrap();
        assert_eq!(file.name, "notes.pdf");
        assert!(file.download_url.is_none());
    }
}
