use std::sync::Arc;

use serenity::all::{
    ChannelId, Colour, CreateEmbed, CreateEmbedAuthor, CreateEmbedFooter, CreateMessage,
    EditMessage, Http, Message, MessageId,
};
use serenity::async_trait;

use super::command_signature;
use super::tree::CommandSummary;
use crate::commands::CommandInfo;
use crate::hey;
use crate::pagination::{
    Mode, NavAction, OverlayKind, PaginationError, Phase, Renderer, SessionState, StopReason,
    View,
};

const WELCOME: &str = "Welcome to the interactive help pages!";
const EMPTY_PAGE: &str = "There are no commands to show here.";
const EMPTY_BOT: &str = "There are no commands you can use yet.";

const SIGNATURE_NOTATION: [(&str, &str); 4] = [
    ("<argument>", "This means the argument is __**required**__."),
    ("[argument]", "This means the argument is __**optional**__."),
    ("[A|B]", "This means that it can be __**either A or B**__."),
    (
        "[argument...]",
        "This means you can have multiple arguments.\n\
         Now that you know the basics, it should be noted that...\n\
         __**You do not type in the brackets!**__",
    ),
];

/// Plain description of one help embed. Kept separate from `CreateEmbed` so
/// two renders can be compared before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelpCard {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    /// `(name, value, inline)`
    pub fields: Vec<(String, String, bool)>,
    pub footer: Option<String>,
}

impl HelpCard {
    pub fn embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::new()
            .colour(Colour::BLURPLE)
            .fields(self.fields.clone());

        if let Some(title) = &self.title {
            embed = embed.title(title);
        }
        if let Some(description) = &self.description {
            embed = embed.description(description);
        }
        if let Some(author) = &self.author {
            embed = embed.author(CreateEmbedAuthor::new(author));
        }
        if let Some(footer) = &self.footer {
            embed = embed.footer(CreateEmbedFooter::new(footer));
        }

        embed
    }
}

/// Text of a command's own help: its description followed by the full help.
pub fn command_description(command: &CommandInfo) -> String {
    match (command.description, command.help) {
        (Some(description), Some(help)) => format!("{}\n\n{}", description, help),
        (Some(description), None) => description.to_string(),
        (None, Some(help)) => help.to_string(),
        (None, None) => "No help found...".to_string(),
    }
}

/// Help for a single command. Sent once, without a session.
pub fn command_card(command: &CommandInfo) -> HelpCard {
    HelpCard {
        title: Some(command_signature(command)),
        description: Some(command_description(command)),
        ..HelpCard::default()
    }
}

/// Fixed text of one help session.
#[derive(Debug, Clone)]
pub struct HelpStyle {
    /// Used when a page has no category heading of its own.
    pub title: String,
    pub description: Option<String>,
    /// Prefix as the user should type it.
    pub prefix: String,
}

impl HelpStyle {
    pub fn card(&self, state: &SessionState, view: View<'_, CommandSummary>) -> HelpCard {
        match view {
            View::Page { heading, entries } => {
                let (title, description) = match heading {
                    Some(heading) => (
                        format!("{} Commands", heading.name),
                        heading.description.clone(),
                    ),
                    None => (self.title.clone(), self.description.clone()),
                };

                let description = match (description, state.mode) {
                    (None, Mode::Nested) if entries.is_empty() => Some(EMPTY_BOT.to_string()),
                    (None, Mode::Flat) if entries.is_empty() => Some(EMPTY_PAGE.to_string()),
                    (description, _) => description,
                };

                HelpCard {
                    title: Some(title),
                    description,
                    author: Some(format!(
                        "Page {}/{} ({} commands)",
                        state.current_page, state.page_count, state.total_entries
                    )),
                    fields: entries
                        .iter()
                        .map(|entry| {
                            let doc = entry.short_doc.unwrap_or("No help given");
                            (entry.heading(), doc.to_string(), false)
                        })
                        .collect(),
                    footer: Some(format!(
                        "Use \"{}help <command>\" for more info on a command.",
                        self.prefix
                    )),
                }
            }
            View::Overlay(kind) => overlay_card(state, kind),
        }
    }
}

fn overlay_card(state: &SessionState, kind: OverlayKind) -> HelpCard {
    let return_to = match state.phase {
        Phase::Overlay { return_to, .. } => return_to,
        _ => state.current_page,
    };

    let (title, fields) = match kind {
        OverlayKind::Reactions => {
            let legend = NavAction::controls_for(state.page_count)
                .into_iter()
                .map(|action| format!("{} {}", action.symbol(), action.describe()))
                .collect::<Vec<_>>()
                .join("\n");
            (
                "Paginator help",
                vec![("What are these reactions for?".to_string(), legend, false)],
            )
        }
        OverlayKind::Usage => {
            let mut fields = vec![(
                "How do I use this bot?".to_string(),
                "Reading the bot signature is pretty simple.".to_string(),
                true,
            )];
            fields.extend(
                SIGNATURE_NOTATION
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string(), false)),
            );
            ("Using the bot", fields)
        }
    };

    HelpCard {
        title: Some(title.to_string()),
        description: Some(WELCOME.to_string()),
        author: None,
        fields,
        footer: Some(format!(
            "We were on page {} before this message.",
            return_to
        )),
    }
}

/// Draws help sessions into one embed message, created on first display and
/// edited afterwards.
pub struct HelpRenderer {
    http: Arc<Http>,
    channel: ChannelId,
    message: Option<Message>,
    last: Option<HelpCard>,
    style: HelpStyle,
}

impl HelpRenderer {
    pub fn new(http: Arc<Http>, channel: ChannelId, style: HelpStyle) -> Self {
        Self {
            http,
            channel,
            message: None,
            last: None,
            style,
        }
    }

    pub fn message_id(&self) -> Option<MessageId> {
        self.message.as_ref().map(|m| m.id)
    }
}

#[async_trait]
impl Renderer for HelpRenderer {
    type Entry = CommandSummary;
    type Artifact = HelpCard;

    fn render(&self, state: &SessionState, view: View<'_, CommandSummary>) -> HelpCard {
        self.style.card(state, view)
    }

    async fn display(&mut self, card: HelpCard) -> Result<(), PaginationError> {
        if self.last.as_ref() == Some(&card) {
            return Ok(());
        }

        match self.message.as_mut() {
            Some(message) => {
                message
                    .edit(&*self.http, EditMessage::new().embed(card.embed()))
                    .await?
            }
            None => {
                let message = self
                    .channel
                    .send_message(&*self.http, CreateMessage::new().embed(card.embed()))
                    .await?;
                self.message = Some(message);
            }
        }

        self.last = Some(card);
        Ok(())
    }

    async fn attach_controls(&mut self, controls: &[NavAction]) -> Result<(), PaginationError> {
        let Some(message) = self.message.as_ref() else {
            return Ok(());
        };

        for action in controls {
            message.react(&*self.http, action.reaction()).await?;
        }
        Ok(())
    }

    async fn close(&mut self, reason: StopReason) {
        let Some(message) = self.message.as_ref() else {
            return;
        };

        let result = match reason {
            StopReason::User => message.delete(&*self.http).await,
            StopReason::TimedOut | StopReason::Closed | StopReason::Failed => {
                message.delete_reactions(&*self.http).await
            }
            StopReason::SinglePage => return,
        };

        if let Err(e) = result {
            hey!("Failed to clean up help message: {}", e);
        }
    }
}
