use serenity::all::{Context, Message};

use super::{CommandInfo, META_CATEGORY};
use crate::helpers::channel_response;

pub const META: CommandInfo = CommandInfo {
    name: "echo",
    category: Some(META_CATEGORY),
    signature: "<content...>",
    help: Some("Repeats the given content."),
    hidden: true,
    owner_only: true,
    ..CommandInfo::EMPTY
};

pub async fn run(ctx: &Context, msg: &Message, content: &str) {
    if content.is_empty() {
        channel_response(ctx, msg.channel_id, "You must specify something to say!").await;
        return;
    }

    channel_response(ctx, msg.channel_id, content).await;
}
