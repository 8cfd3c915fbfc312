use std::sync::Arc;

use serenity::all::{Context, MessageId, ReactionCollector, UserId};
use serenity::async_trait;
use serenity::futures::stream::BoxStream;
use serenity::futures::{Stream, StreamExt};
use tokio::time::{timeout_at, Duration, Instant};

use super::action::NavAction;
use super::timer::deadline_after;
use crate::hey;

/// A recognised input from a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input {
    pub action: NavAction,
    pub user: UserId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerEvent {
    Input(Input),
    /// No input within the idle window. Reported once, the listener is
    /// closed afterwards.
    TimedOut,
    Closed,
}

/// Source of navigation inputs for one session.
#[async_trait]
pub trait InputListener: Send {
    /// Wait for the next event. Must be cancel-safe, the session drops this
    /// future whenever its revert timer fires first.
    async fn recv(&mut self) -> ListenerEvent;

    /// Stop receiving. Calling it more than once is fine.
    fn unsubscribe(&mut self);
}

/// Listener over any stream of inputs with a sliding idle timeout: the
/// window restarts with every delivered input.
pub struct StreamListener {
    stream: Option<BoxStream<'static, Input>>,
    idle: Duration,
    deadline: Instant,
}

impl StreamListener {
    pub fn new(stream: impl Stream<Item = Input> + Send + 'static, idle: Duration) -> Self {
        Self {
            stream: Some(stream.boxed()),
            idle,
            deadline: deadline_after(idle),
        }
    }
}

#[async_trait]
impl InputListener for StreamListener {
    async fn recv(&mut self) -> ListenerEvent {
        let Some(stream) = self.stream.as_mut() else {
            return ListenerEvent::Closed;
        };

        match timeout_at(self.deadline, stream.next()).await {
            Ok(Some(input)) => {
                self.deadline = deadline_after(self.idle);
                ListenerEvent::Input(input)
            }
            Ok(None) => {
                self.unsubscribe();
                ListenerEvent::Closed
            }
            Err(_) => {
                self.unsubscribe();
                ListenerEvent::TimedOut
            }
        }
    }

    fn unsubscribe(&mut self) {
        // dropping the collector stream detaches it from the shard
        self.stream = None;
    }
}

/// Subscribe to reactions `owner` adds to `message`. Recognised reactions are
/// removed again right away so the same control can be pressed repeatedly;
/// everything else is left alone and never reaches the session.
pub fn subscribe_reactions(
    ctx: &Context,
    message: MessageId,
    owner: UserId,
    idle: Duration,
) -> StreamListener {
    let http = Arc::clone(&ctx.http);
    let reactions = ReactionCollector::new(&ctx.shard)
        .message_id(message)
        .author_id(owner)
        .stream()
        .filter_map(move |reaction| {
            let http = Arc::clone(&http);
            async move {
                let user = reaction.user_id?;
                let action = NavAction::from_reaction(&reaction.emoji)?;

                if let Err(e) = reaction.delete(&*http).await {
                    hey!("Failed to remove navigation reaction: {}", e);
                }

                Some(Input { action, user })
            }
        });

    StreamListener::new(reactions, idle)
}
