//! Card and gallery view layer.
//!
//! This module owns everything the user sees:
//! - Card: one item's view state machine and strategy-dispatched tiles
//! - Gallery: the card list with filtering, mounting and removal
//!
//! Rendering is plain text; the classifier decides what each card shows,
//! the state machine decides how.

pub mod card;
pub mod gallery;
pub mod render;

pub use card::{Card, CardEffect, CardEvent, CardViewState, DownloadAction};
pub use gallery::Gallery;
