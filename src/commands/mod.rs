use serenity::all::{Context, Message};

use crate::config::ConfigSettings;
use crate::helpers::Invocation;

pub(crate) mod echo;
pub(crate) mod help;
pub(crate) mod prefix;
pub(crate) mod quit;

/// Static description of a command, used for dispatch and by the help command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandInfo {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// Name of the group this command is a subcommand of.
    pub parent: Option<&'static str>,
    pub category: Option<&'static str>,
    /// Parameter list, e.g. `<prefix>` or `[command...]`.
    pub signature: &'static str,
    /// One-line summary. Falls back to the first line of `help`.
    pub brief: Option<&'static str>,
    pub help: Option<&'static str>,
    pub description: Option<&'static str>,
    pub hidden: bool,
    pub owner_only: bool,
}

impl CommandInfo {
    pub const EMPTY: CommandInfo = CommandInfo {
        name: "",
        aliases: &[],
        parent: None,
        category: None,
        signature: "",
        brief: None,
        help: None,
        description: None,
        hidden: false,
        owner_only: false,
    };

    pub fn qualified_name(&self) -> String {
        match self.parent {
            Some(parent) => format!("{} {}", parent, self.name),
            None => self.name.to_string(),
        }
    }

    pub fn short_doc(&self) -> Option<&'static str> {
        self.brief
            .or_else(|| self.help.and_then(|help| help.lines().next()))
            .filter(|doc| !doc.trim().is_empty())
    }

    pub fn answers_to(&self, word: &str) -> bool {
        self.name == word || self.aliases.contains(&word)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub description: Option<&'static str>,
}

pub const META_CATEGORY: &str = "Meta";

pub static CATEGORIES: &[CategoryInfo] = &[CategoryInfo {
    name: META_CATEGORY,
    description: Some("Utilities related to Discord or the bot itself"),
}];

pub static COMMANDS: &[CommandInfo] = &[
    help::META,
    prefix::META,
    prefix::SET,
    prefix::RESET,
    echo::META,
    quit::META,
];

/// Lookup view over a set of commands and their categories.
#[derive(Debug, Clone, Copy)]
pub struct Registry<'a> {
    pub commands: &'a [CommandInfo],
    pub categories: &'a [CategoryInfo],
}

impl Default for Registry<'static> {
    fn default() -> Self {
        Self {
            commands: COMMANDS,
            categories: CATEGORIES,
        }
    }
}

impl<'a> Registry<'a> {
    pub fn top_level(&self) -> impl Iterator<Item = &'a CommandInfo> {
        let commands = self.commands;
        commands.iter().filter(|c| c.parent.is_none())
    }

    pub fn subcommands(&self, parent: &CommandInfo) -> impl Iterator<Item = &'a CommandInfo> {
        let parent = parent.qualified_name();
        let commands = self.commands;
        commands
            .iter()
            .filter(move |c| c.parent == Some(parent.as_str()))
    }

    pub fn has_subcommands(&self, command: &CommandInfo) -> bool {
        self.subcommands(command).next().is_some()
    }

    /// Find a command by name or alias among the children of `parent`, or
    /// among top-level commands without one.
    pub fn find(&self, word: &str, parent: Option<&CommandInfo>) -> Option<&'a CommandInfo> {
        match parent {
            Some(parent) => self.subcommands(parent).find(|c| c.answers_to(word)),
            None => self.top_level().find(|c| c.answers_to(word)),
        }
    }

    pub fn category(&self, name: &str) -> Option<&'a CategoryInfo> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn in_category(&self, category: &str) -> impl Iterator<Item = &'a CommandInfo> {
        let category = category.to_string();
        self.top_level()
            .filter(move |c| c.category == Some(category.as_str()))
    }
}

/// Run a parsed invocation. Unknown commands and owner-only commands used by
/// anyone else are ignored without a reply.
pub async fn dispatch(
    ctx: &Context,
    msg: &Message,
    invocation: &Invocation<'_>,
    prefix: &str,
    config: &ConfigSettings,
) {
    let registry = Registry::default();
    let Some(command) = registry.find(invocation.name, None) else {
        return;
    };

    if command.owner_only && !config.is_owner(msg.author.id) {
        return;
    }

    match command.name {
        "help" => help::run(ctx, msg, invocation, prefix, config).await,
        "prefix" => prefix::run(ctx, msg, invocation.args, prefix, config).await,
        "echo" => echo::run(ctx, msg, invocation.args).await,
        "quit" => quit::run(ctx, msg).await,
        _ => {}
    }
}
