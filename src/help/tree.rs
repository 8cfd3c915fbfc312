use std::collections::BTreeMap;

use crate::commands::{CommandInfo, Registry};
use crate::pagination::Category;

/// Bucket for commands registered without a category. The leading zero-width
/// space sorts it after every named category.
pub const NO_CATEGORY: &str = "\u{200b}No Category";

pub const BOT_HELP_PER_PAGE: usize = 9;

/// One listed command on a help page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSummary {
    pub qualified_name: String,
    pub signature: &'static str,
    pub short_doc: Option<&'static str>,
}

impl CommandSummary {
    pub fn from_command(command: &CommandInfo) -> Self {
        Self {
            qualified_name: command.qualified_name(),
            signature: command.signature,
            short_doc: command.short_doc(),
        }
    }

    /// Field name on a help page, e.g. `prefix set <prefix>`.
    pub fn heading(&self) -> String {
        if self.signature.is_empty() {
            return self.qualified_name.clone();
        }
        format!("{} {}", self.qualified_name, self.signature)
    }
}

/// Who is asking for help. Hidden commands are never listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Visibility {
    pub show_owner_only: bool,
}

impl Visibility {
    pub fn allows(&self, command: &CommandInfo) -> bool {
        !command.hidden && (self.show_owner_only || !command.owner_only)
    }

    /// Visible commands sorted by name.
    pub fn filter<'a>(&self, commands: impl Iterator<Item = &'a CommandInfo>) -> Vec<&'a CommandInfo> {
        let mut visible: Vec<_> = commands.filter(|c| self.allows(c)).collect();
        visible.sort_by_key(|c| c.name);
        visible
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HelpTree {
    pub categories: Vec<Category<CommandSummary>>,
    /// Commands across all categories.
    pub total: usize,
}

pub struct HelpTreeBuilder<'a> {
    registry: Registry<'a>,
    visibility: Visibility,
}

impl<'a> HelpTreeBuilder<'a> {
    pub fn new(registry: Registry<'a>, visibility: Visibility) -> Self {
        Self {
            registry,
            visibility,
        }
    }

    pub fn build(&self) -> HelpTree {
        let mut grouped: BTreeMap<&str, Vec<&CommandInfo>> = BTreeMap::new();
        for command in self.visibility.filter(self.registry.top_level()) {
            let key = command.category.unwrap_or(NO_CATEGORY);
            grouped.entry(key).or_default().push(command);
        }

        let mut total = 0;
        let categories = grouped
            .into_iter()
            .filter(|(_, commands)| !commands.is_empty())
            .map(|(name, commands)| {
                total += commands.len();
                Category {
                    name: name.to_string(),
                    description: self
                        .registry
                        .category(name)
                        .and_then(|c| c.description)
                        .map(str::to_string),
                    entries: commands.into_iter().map(CommandSummary::from_command).collect(),
                }
            })
            .collect();

        HelpTree { categories, total }
    }
}
