use serenity::all::{Context, Message};

use super::{CommandInfo, META_CATEGORY};
use crate::{
    config::ConfigSettings,
    guildfile::GuildSettings,
    helpers::{channel_response, is_reserved_prefix, split_word},
};

pub const META: CommandInfo = CommandInfo {
    name: "prefix",
    category: Some(META_CATEGORY),
    help: Some("Shows the prefix used in this server."),
    description: Some("Manages the prefix the bot answers to in this server."),
    ..CommandInfo::EMPTY
};

pub const SET: CommandInfo = CommandInfo {
    name: "set",
    aliases: &["change"],
    parent: Some("prefix"),
    signature: "<prefix>",
    help: Some("Sets a custom prefix for this server.\nMentioning the bot always works as well."),
    ..CommandInfo::EMPTY
};

pub const RESET: CommandInfo = CommandInfo {
    name: "reset",
    parent: Some("prefix"),
    help: Some("Goes back to the default prefix."),
    ..CommandInfo::EMPTY
};

pub async fn run(ctx: &Context, msg: &Message, args: &str, prefix: &str, config: &ConfigSettings) {
    let (sub, rest) = split_word(args);

    if sub.is_empty() {
        channel_response(
            ctx,
            msg.channel_id,
            format!("My prefix here is `{}`", prefix.trim_end()),
        )
        .await;
        return;
    }

    let Some(guild) = msg.guild_id else {
        channel_response(ctx, msg.channel_id, "This command can only be used in a server").await;
        return;
    };

    if SET.answers_to(sub) {
        let new_prefix = rest.trim();
        if new_prefix.is_empty() {
            channel_response(ctx, msg.channel_id, "You must specify a prefix!").await;
            return;
        }
        if is_reserved_prefix(new_prefix, ctx.cache.current_user().id) {
            channel_response(ctx, msg.channel_id, "That is a reserved prefix already in use.").await;
            return;
        }

        GuildSettings::get(&guild).set_prefix(new_prefix);
        channel_response(ctx, msg.channel_id, format!("Prefix set to `{}`", new_prefix)).await;
    } else if RESET.answers_to(sub) {
        GuildSettings::get(&guild).clear_prefix();
        channel_response(
            ctx,
            msg.channel_id,
            format!("Prefix reset to `{}`", config.prefix()),
        )
        .await;
    } else {
        channel_response(
            ctx,
            msg.channel_id,
            format!("Command \"prefix\" has no subcommand named {}", sub),
        )
        .await;
    }
}
