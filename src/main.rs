use serenity::all::GatewayIntents;
use serenity::Client;
use std::env;
use std::sync::Arc;

use crate::commands::quit::ShardManagerContainer;
use crate::config::ConfigSettings;
use crate::discord_handler::Handler;

pub mod config;
pub mod guildfile;
pub mod helpers;
pub mod logging;
pub mod pagination;

mod commands;
mod discord_handler;
mod help;

#[tokio::main]
async fn main() {
    yay!("Pager Bot is starting up!");

    if let Err(e) = dotenv::dotenv() {
        hey!("No .env file loaded: {}", e);
    }

    let Ok(token) = env::var("DISCORD_TOKEN") else {
        nay!("DISCORD_TOKEN not found in environment");
        return;
    };

    let config = match ConfigSettings::get() {
        Ok(config) => config,
        Err(e) => {
            nay!("Failed to load config: {}", e);
            return;
        }
    };
    say!("Using default prefix {}", config.prefix());

    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGE_REACTIONS;

    let Ok(mut client) = Client::builder(token, intents)
        .event_handler(Handler {
            config: Arc::new(config),
        })
        .await
    else {
        nay!("Error creating client");
        return;
    };

    {
        let mut data = client.data.write().await;
        data.insert::<ShardManagerContainer>(Arc::clone(&client.shard_manager));
    }

    let shard_manager = Arc::clone(&client.shard_manager);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            hey!("Interrupted, shutting down");
            shard_manager.shutdown_all().await;
        }
    });

    if let Err(err) = client.start().await {
        nay!("Client error: {}", err);
    }
}
