//! Reaction-driven paging of a single message.
//!
//! A [`NavigationController`] owns one session: it lays out the entries,
//! asks a [`Renderer`] to draw the current page and consumes inputs from an
//! [`InputListener`] until the owner stops it or goes idle.

mod action;
mod controller;
mod error;
mod layout;
mod listener;
mod nested;
mod page_source;
mod render;
mod timer;

pub use action::NavAction;
pub use controller::{NavigationController, Phase, SessionSettings, SessionState};
pub use error::PaginationError;
pub use layout::{Entries, Mode, Pages};
pub use listener::{subscribe_reactions, Input, InputListener, ListenerEvent, StreamListener};
pub use nested::{Category, CategoryHeading, NestedPages};
pub use page_source::{page_count_for, PageSource};
pub use render::{OverlayKind, Renderer, StopReason, View};
pub use timer::RevertTimer;
