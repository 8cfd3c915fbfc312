use serenity::async_trait;

use super::action::NavAction;
use super::controller::SessionState;
use super::nested::CategoryHeading;
use super::PaginationError;

/// Transient screens shown over the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayKind {
    /// What each reaction control does.
    Reactions,
    /// How to read command signatures.
    Usage,
}

/// Why a session ended. Surfaces use it to decide how to leave the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The owner pressed stop.
    User,
    /// No input arrived within the session timeout.
    TimedOut,
    /// The input stream went away.
    Closed,
    /// There was only one page, so no session was ever needed.
    SinglePage,
    /// The controls could not be attached.
    Failed,
}

/// What the renderer is asked to draw.
#[derive(Debug, Clone, Copy)]
pub enum View<'a, E> {
    Page {
        /// Category of the page in nested mode.
        heading: Option<&'a CategoryHeading>,
        entries: &'a [E],
    },
    Overlay(OverlayKind),
}

/// Display backend of a navigation session.
///
/// `render` is pure and turns the session state plus a view into something
/// displayable; `display` pushes it to the live message, creating the
/// message on the first call and editing it in place afterwards.
#[async_trait]
pub trait Renderer: Send {
    type Entry: Send + Sync;
    type Artifact: Send;

    fn render(&self, state: &SessionState, view: View<'_, Self::Entry>) -> Self::Artifact;

    async fn display(&mut self, artifact: Self::Artifact) -> Result<(), PaginationError>;

    /// Make the controls available to the user (e.g. add reactions).
    async fn attach_controls(&mut self, _controls: &[NavAction]) -> Result<(), PaginationError> {
        Ok(())
    }

    /// Best-effort teardown of the surface once the session stops.
    async fn close(&mut self, _reason: StopReason) {}
}
