use std::sync::Arc;

use serenity::{
    all::{ActivityData, Context, EventHandler, Message, OnlineStatus, Ready, ResumedEvent},
    async_trait,
};

use crate::{
    commands, config::ConfigSettings, guildfile::GuildSettings, helpers::parse_invocation, hey,
    yay,
};

pub(crate) struct Handler {
    pub config: Arc<ConfigSettings>,
}

impl Handler {
    /// The guild's own prefix if it set one, otherwise the configured default.
    fn prefix_for(&self, msg: &Message) -> String {
        msg.guild_id
            .and_then(|guild| GuildSettings::get(&guild).get_prefix().map(str::to_string))
            .unwrap_or_else(|| self.config.prefix().to_string())
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        // Ignore messages from bots
        if msg.author.bot {
            return;
        }

        let bot = ctx.cache.current_user().id;
        let prefix = self.prefix_for(&msg);
        let Some(invocation) = parse_invocation(&msg.content, &prefix, bot) else {
            return;
        };

        commands::dispatch(&ctx, &msg, &invocation, &prefix, &self.config).await;
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        yay!("{} is connected!", ready.user.name);

        ctx.set_presence(
            Some(ActivityData::listening(format!("{}help", self.config.prefix()))),
            OnlineStatus::Online,
        );
    }

    async fn resume(&self, _: Context, _: ResumedEvent) {
        hey!("Resumed");
    }
}
