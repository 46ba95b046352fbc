//! Third-party embed script loading.
//!
//! Twitter, Instagram and Pinterest widgets each need one provider script
//! per process; YouTube needs none. The registry tracks an explicit
//! lifecycle per provider and drives a host-supplied loader:
//!
//! ```text
//! NotLoaded ──ensure_ready──▶ Loading ──inject ok──▶ Ready
//!     ▲                                    │
//!     └───────────── inject failed ────────┘
//! ```
//!
//! `ensure_ready` is idempotent: once a provider is `Ready` (or the host
//! already has the script by its stable element id) no second injection
//! happens; later mounts only re-trigger the provider's embed scan.

use std::collections::HashMap;

use thiserror::Error;

use crate::domain::ContentKind;

/// Errors from the script loading layer
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to inject {provider} script: {reason}")]
    InjectFailed {
        provider: Provider,
        reason: String,
    },
}

/// A third-party widget provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Twitter,
    Instagram,
    Pinterest,
}

impl Provider {
    /// The provider a content kind depends on, if any.
    ///
    /// YouTube thumbnails and plain tiles need no script at all.
    pub fn for_kind(kind: ContentKind) -> Option<Provider> {
        match kind {
            ContentKind::Twitter => Some(Provider::Twitter),
            ContentKind::Instagram => Some(Provider::Instagram),
            ContentKind::Pinterest => Some(Provider::Pinterest),
            ContentKind::YouTube
            | ContentKind::LinkedIn
            | ContentKind::Documents
            | ContentKind::Other => None,
        }
    }

    /// Stable identifier for the injected script element.
    ///
    /// Hosts use this for the presence check, so it must never change
    /// between mounts.
    pub fn element_id(self) -> &'static str {
        match self {
            Provider::Twitter => "braincache-twitter-wjs",
            Provider::Instagram => "braincache-instagram-embed",
            Provider::Pinterest => "braincache-pinterest-pinit",
        }
    }

    /// Script source URL
    pub fn script_url(self) -> &'static str {
        match self {
            Provider::Twitter => "https://platform.twitter.com/widgets.js",
            Provider::Instagram => "https://www.instagram.com/embed.js",
            Provider::Pinterest => "https://assets.pinterest.com/js/pinit.js",
        }
    }
}

impl std::fmt::Display for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provider::Twitter => write!(f, "twitter"),
            Provider::Instagram => write!(f, "instagram"),
            Provider::Pinterest => write!(f, "pinterest"),
        }
    }
}

/// Lifecycle of one provider script within the process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// No injection attempted yet
    NotLoaded,

    /// Injection in progress
    Loading,

    /// Script present; embed scans can run
    Ready,
}

/// Capability the hosting environment supplies for script handling.
///
/// The registry only needs "is it there", "put it there" and "re-scan"
/// semantics; everything else about the host stays opaque.
pub trait ScriptHost {
    /// Check for an existing script element by its stable id
    fn is_present(&self, provider: Provider) -> bool;

    /// Inject the provider script
    fn inject(&mut self, provider: Provider) -> Result<(), ScriptError>;

    /// Invoke the provider's idempotent "reprocess embeds" entry point
    fn reprocess(&mut self, provider: Provider);
}

/// Process-wide registry of provider script states.
///
/// Single-threaded by design; the inject-once invariant is enforced by
/// the state map and the host presence check, not by locking.
#[derive(Debug, Default)]
pub struct ScriptRegistry {
    states: HashMap<Provider, LoadState>,
}

impl ScriptRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of a provider
    pub fn state(&self, provider: Provider) -> LoadState {
        self.states
            .get(&provider)
            .copied()
            .unwrap_or(LoadState::NotLoaded)
    }

    /// Ensure the provider script is loaded, injecting at most once.
    ///
    /// Safe to call for every card mount. A host that already carries the
    /// script (found by element id) is adopted as `Ready` without a second
    /// injection. On injection failure the provider returns to
    /// `NotLoaded` so a later mount may try again.
    pub fn ensure_ready(
        &mut self,
        provider: Provider,
        host: &mut dyn ScriptHost,
    ) -> Result<(), ScriptError> {
        if self.state(provider) == LoadState::Ready {
            return Ok(());
        }

        if host.is_present(provider) {
            self.states.insert(provider, LoadState::Ready);
            return Ok(());
        }

        self.states.insert(provider, LoadState::Loading);
        match host.inject(provider) {
            Ok(()) => {
                self.states.insert(provider, LoadState::Ready);
                Ok(())
            }
            Err(err) => {
                self.states.insert(provider, LoadState::NotLoaded);
                Err(err)
            }
        }
    }

    /// Trigger the provider's embed scan for a freshly mounted card.
    ///
    /// Only meaningful once the provider is `Ready`; calls in other
    /// states are dropped.
    pub fn reprocess(&mut self, provider: Provider, host: &mut dyn ScriptHost) {
        if self.state(provider) == LoadState::Ready {
            host.reprocess(provider);
        }
    }
}

/// Host for environments without a live document (the CLI).
///
/// Tracks injected scripts in memory and logs what a browser host would
/// do, so gallery mounting exercises the same registry path everywhere.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    injected: std::collections::HashSet<Provider>,
}

impl HeadlessHost {
    /// Create an empty host
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScriptHost for HeadlessHost {
    fn is_present(&self, provider: Provider) -> bool {
        self.injected.contains(&provider)
    }

    fn inject(&mut self, provider: Provider) -> Result<(), ScriptError> {
        tracing::debug!(%provider, id = provider.element_id(), url = provider.script_url(), "inject embed script");
        self.injected.insert(provider);
        Ok(())
    }

    fn reprocess(&mut self, provider: Provider) {
        tracing::debug!(%provider, "reprocess embeds");
    }
}
