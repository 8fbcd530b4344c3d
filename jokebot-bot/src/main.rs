mod config;
mod events;

use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tracing::{error, info, warn};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use rustls::crypto::ring::default_provider;

use jokebot_core::dispatch::NO_DATA_MESSAGE;
use jokebot_core::{Data, Error};
use jokebot_store::{joke_endpoint, load_or_empty};

use crate::config::BotConfig;
use crate::events::lifecycle::unless_interrupted;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_filter(filter_fn(|metadata| {
        let target = metadata.target();

        let within_info_level = *metadata.level() <= tracing::Level::INFO;
        if !within_info_level {
            return false;
        }

        !(target.starts_with("serenity::gateway::bridge::shard_manager")
            || target.starts_with("serenity::gateway::bridge::shard_runner"))
    }));

    tracing_subscriber::registry().with(fmt_layer).init();

    default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls ring provider"))?;

    // Load the .env file
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env()?;
    info!(?config, "Configuration loaded.");

    let mut sigint = events::lifecycle::listen_for_sigint();

    // Jokes are fetched once; the store is frozen before any command can run.
    let http_client = reqwest::Client::new();
    let Some(jokes) = unless_interrupted(
        load_or_empty(&http_client, &joke_endpoint(&config.api_url)),
        &mut sigint,
    )
    .await
    else {
        info!("SIGINT received during startup, exiting.");
        return Ok(());
    };
    let data = Data::new(jokes);

    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    let setup_config = config.clone();
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: jokebot_commands::commands(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!(user = %ready.user.tag(), "Logged in.");

                if ready.application.id != setup_config.application_id {
                    warn!(
                        configured = %setup_config.application_id,
                        reported = %ready.application.id,
                        "DISCORD_CLIENT_ID does not match the gateway application id"
                    );
                }

                events::lifecycle::announce_launch(
                    Arc::clone(&ctx.http),
                    setup_config.channel_id,
                )
                .await;

                match poise::builtins::register_in_guild(
                    ctx,
                    &framework.options().commands,
                    setup_config.guild_id,
                )
                .await
                {
                    Ok(()) => info!(guild_id = %setup_config.guild_id, "Slash commands registered."),
                    Err(source) => error!(?source, "failed to register slash commands"),
                }

                info!(pairs = data.jokes.pair_count(), "Jokebot is ready!");
                Ok(data)
            })
        })
        .build();

    info!("Jokebot is connecting...");

    let Some(client) = unless_interrupted(
        serenity::ClientBuilder::new(&config.token, intents).framework(framework),
        &mut sigint,
    )
    .await
    else {
        info!("SIGINT received during startup, exiting.");
        return Ok(());
    };
    let mut client = client?;

    let http = Arc::clone(&client.http);
    let shard_manager = Arc::clone(&client.shard_manager);

    match unless_interrupted(client.start(), &mut sigint).await {
        Some(result) => result?,
        None => events::lifecycle::shutdown(http, shard_manager, config.channel_id).await,
    }

    Ok(())
}

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!(?error, "command error");

            if let Err(source) = ctx.say(NO_DATA_MESSAGE).await {
                error!(?source, "failed to deliver fallback reply");
            }
        }
        poise::FrameworkError::UnknownInteraction {
            ctx,
            framework,
            interaction,
            ..
        } => {
            events::interactions::reply_unknown_interaction(ctx, framework.user_data, interaction)
                .await;
        }
        other => {
            error!(?other, "framework error");
        }
    }
}
