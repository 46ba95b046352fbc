//! braincache - second brain for links and files
//!
//! Client-side core of the BrainCache app: save links and files, browse
//! them as a filterable card gallery, open an enlarged detail view, and
//! share the collection read-only.
//!
//! # Architecture
//!
//! Two pieces carry the design:
//! - The classifier: pure functions from `(kind, source_url)` to an
//!   embed descriptor; total, never errors
//! - The card view state machine: expand / embed-failed / detail axes,
//!   dispatching to one rendering strategy per descriptor with graceful
//!   fallback
//!
//! Everything else is a collaborator behind a contract: the backend
//! content repository, the on-disk session, the embed script host.
//!
//! # Modules
//!
//! - `domain`: Data structures (ContentItem, ContentKind, EmbedDescriptor)
//! - `classify`: URL classification and embed resolution
//! - `view`: Card state machine and gallery rendering
//! - `embed`: Provider script registry and host capability
//! - `adapters`: Backend client, session store, thumbnail cache
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Sign in and browse
//! braincache signin shashank -p secret
//! braincache list --kind youtube
//!
//! # Save a link
//! braincache add "first video" --kind youtube \
//!     --link "https://youtu.be/p2j6Wq57MEE"
//!
//! # Share read-only
//! braincache share
//! ```

pub mod adapters;
pub mod classify;
pub mod cli;
pub mod config;
pub mod domain;
pub mod embed;
pub mod view;

// Re-export main types at crate root for convenience
pub use adapters::{BackendClient, ContentDraft, ContentRepository, RepositoryError};
pub use classify::classify;
pub use domain::{ContentItem, ContentKind, EmbedDescriptor, EmbedStrategy, FileAttachment};
pub use embed::{Provider, ScriptHost, ScriptRegistry};
pub use view::{Card, CardEvent, CardViewState, Gallery};
