//! Embed script lifecycle management.
//!
//! Cards that depend on a third-party widget (Twitter, Instagram,
//! Pinterest) signal this module on mount; the registry guarantees each
//! provider script is loaded at most once per process and re-scanned for
//! every new mount.

pub mod scripts;

pub use scripts::{HeadlessHost, LoadState, Provider, ScriptError, ScriptHost, ScriptRegistry};
