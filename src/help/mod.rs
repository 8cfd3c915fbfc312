//! The paginated help command.
//!
//! A query is resolved against the command [`Registry`] into one of four
//! targets. Everything but single-command help runs as a reaction-driven
//! session on top of [`crate::pagination`].

use std::sync::Arc;
use std::time::Duration;

use serenity::all::{Context, CreateMessage, Message};
use thiserror::Error;

use crate::commands::{CategoryInfo, CommandInfo, Registry};
use crate::config::ConfigSettings;
use crate::helpers::channel_response;
use crate::{nay, say};
use crate::pagination::{
    subscribe_reactions, Entries, NavigationController, PaginationError, SessionSettings,
};

mod render;
mod tree;

pub use render::{command_card, command_description, HelpRenderer, HelpStyle};
pub use tree::{CommandSummary, HelpTreeBuilder, Visibility, BOT_HELP_PER_PAGE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTarget<'a> {
    Bot,
    Category(&'a CategoryInfo),
    /// A command with visible subcommands.
    Group(&'a CommandInfo),
    Command(&'a CommandInfo),
}

/// Reasons a help query could not be resolved. The messages are sent to the
/// channel as they are.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HelpError {
    #[error("No command called \"{0}\" found.")]
    NotFound(String),

    #[error("Command \"{parent}\" has no subcommand named {name}")]
    NoSubcommand { parent: String, name: String },

    #[error("Command \"{0}\" has no subcommands.")]
    NoSubcommands(String),
}

/// Usage line of a command: `[name|alias] <params>`, prefixed with the
/// parent for subcommands.
pub fn command_signature(command: &CommandInfo) -> String {
    let name = if command.aliases.is_empty() {
        command.name.to_string()
    } else {
        format!("[{}|{}]", command.name, command.aliases.join("|"))
    };

    let name = match command.parent {
        Some(parent) => format!("{} {}", parent, name),
        None => name,
    };

    if command.signature.is_empty() {
        name
    } else {
        format!("{} {}", name, command.signature)
    }
}

/// Work out what `query` asks help for. A category name wins over a command
/// of the same name, and a command path is walked one word at a time.
pub fn resolve<'a>(
    registry: &Registry<'a>,
    query: &str,
    visibility: Visibility,
) -> Result<HelpTarget<'a>, HelpError> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(HelpTarget::Bot);
    }

    if let Some(category) = registry.category(query) {
        return Ok(HelpTarget::Category(category));
    }

    let mut words = query.split_whitespace();
    let first = words.next().unwrap_or(query);
    let Some(mut command) = registry.find(first, None) else {
        return Err(HelpError::NotFound(first.to_string()));
    };

    for word in words {
        if !registry.has_subcommands(command) {
            return Err(HelpError::NoSubcommands(command.qualified_name()));
        }

        command = registry
            .find(word, Some(command))
            .ok_or_else(|| HelpError::NoSubcommand {
                parent: command.qualified_name(),
                name: word.to_string(),
            })?;
    }

    let visible = visibility.filter(registry.subcommands(command));
    if visible.is_empty() {
        Ok(HelpTarget::Command(command))
    } else {
        Ok(HelpTarget::Group(command))
    }
}

fn summaries<'a>(
    commands: impl Iterator<Item = &'a CommandInfo>,
    visibility: Visibility,
) -> Vec<CommandSummary> {
    visibility
        .filter(commands)
        .into_iter()
        .map(CommandSummary::from_command)
        .collect()
}

/// Answer a help request in the channel of `msg`. `prefix` is the prefix as
/// the user should type it.
pub async fn send_help(ctx: &Context, msg: &Message, query: &str, prefix: &str, config: &ConfigSettings) {
    let registry = Registry::default();
    let visibility = Visibility {
        show_owner_only: config.is_owner(msg.author.id),
    };
    let settings = config.help();

    let target = match resolve(&registry, query, visibility) {
        Ok(target) => target,
        Err(e) => {
            channel_response(ctx, msg.channel_id, e.to_string()).await;
            return;
        }
    };

    let (style, entries, page_settings) = match target {
        HelpTarget::Bot => {
            let tree = HelpTreeBuilder::new(registry, visibility).build();
            say!(
                "{} opened bot help: {} commands in {} categories",
                msg.author.name,
                tree.total,
                tree.categories.len()
            );
            let style = HelpStyle {
                title: "Bot Commands".to_string(),
                description: None,
                prefix: prefix.to_string(),
            };
            (style, Entries::Nested(tree.categories), settings.bot_help_settings())
        }
        HelpTarget::Category(category) => {
            let style = HelpStyle {
                title: format!("{} Commands", category.name),
                description: category.description.map(str::to_string),
                prefix: prefix.to_string(),
            };
            let entries = summaries(registry.in_category(category.name), visibility);
            (style, Entries::Flat(entries), settings.page_settings())
        }
        HelpTarget::Group(group) => {
            let style = HelpStyle {
                title: command_signature(group),
                description: Some(command_description(group)),
                prefix: prefix.to_string(),
            };
            let entries = summaries(registry.subcommands(group), visibility);
            (style, Entries::Flat(entries), settings.page_settings())
        }
        HelpTarget::Command(command) => {
            let builder = CreateMessage::new().embed(command_card(command).embed());
            if let Err(e) = msg.channel_id.send_message(&ctx.http, builder).await {
                nay!("Failed to send command help: {}", e);
            }
            return;
        }
    };

    if let Err(e) = paginate(ctx, msg, style, entries, page_settings, settings.session_timeout()).await {
        nay!("Help session in channel {} failed: {}", msg.channel_id, e);
        channel_response(ctx, msg.channel_id, e.to_string()).await;
    }
}

async fn paginate(
    ctx: &Context,
    msg: &Message,
    style: HelpStyle,
    entries: Entries<CommandSummary>,
    settings: SessionSettings,
    session_timeout: Duration,
) -> Result<(), PaginationError> {
    let renderer = HelpRenderer::new(Arc::clone(&ctx.http), msg.channel_id, style);
    let controller = NavigationController::start(renderer, msg.author.id, entries, settings).await?;
    if controller.is_stopped() {
        return Ok(());
    }

    let Some(message) = controller.renderer().message_id() else {
        return Ok(());
    };

    // subscribed before `run` adds the reactions, so early presses are kept
    let listener = subscribe_reactions(ctx, message, msg.author.id, session_timeout);
    controller.run(listener).await?;
    Ok(())
}
