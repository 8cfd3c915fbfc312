use std::sync::Arc;

use serenity::all::{Context, Message, ShardManager};
use serenity::prelude::TypeMapKey;

use super::{CommandInfo, META_CATEGORY};
use crate::{helpers::channel_response, hey, nay};

pub const META: CommandInfo = CommandInfo {
    name: "quit",
    category: Some(META_CATEGORY),
    help: Some("Shuts the bot down."),
    hidden: true,
    owner_only: true,
    ..CommandInfo::EMPTY
};

pub struct ShardManagerContainer;

impl TypeMapKey for ShardManagerContainer {
    type Value = Arc<ShardManager>;
}

pub async fn run(ctx: &Context, msg: &Message) {
    let shard_manager = {
        let data = ctx.data.read().await;
        data.get::<ShardManagerContainer>().cloned()
    };

    let Some(shard_manager) = shard_manager else {
        nay!("Shard manager is not registered, cannot quit");
        channel_response(ctx, msg.channel_id, "There was a problem shutting down.").await;
        return;
    };

    hey!("Shutdown requested by {}", msg.author.name);
    channel_response(ctx, msg.channel_id, "Shutting down.").await;
    shard_manager.shutdown_all().await;
}
