use serenity::all::{Context, Message};

use super::{CommandInfo, META_CATEGORY};
use crate::config::ConfigSettings;
use crate::help::send_help;
use crate::helpers::{clean_prefix, Invocation};

pub const META: CommandInfo = CommandInfo {
    name: "help",
    category: Some(META_CATEGORY),
    signature: "[command...]",
    help: Some("Shows help about the bot, a command, or a category"),
    ..CommandInfo::EMPTY
};

pub async fn run(
    ctx: &Context,
    msg: &Message,
    invocation: &Invocation<'_>,
    prefix: &str,
    config: &ConfigSettings,
) {
    let bot_name = ctx.cache.current_user().name.clone();
    let prefix = clean_prefix(invocation.used, prefix, &bot_name);

    send_help(ctx, msg, invocation.args, &prefix, config).await;
}
