use poise::serenity_prelude as serenity;
use tracing::{error, info};

use jokebot_core::Data;
use jokebot_core::dispatch::{CommandInvoked, NO_DATA_MESSAGE};

/// Answer a slash command the framework has no handler for, such as a stale
/// registration left over from an older build.
pub async fn reply_unknown_interaction(
    ctx: &serenity::Context,
    data: &Data,
    interaction: &serenity::CommandInteraction,
) {
    let event = CommandInvoked::new(interaction.data.name.as_str());
    info!(command = %event.command_name, "received unregistered command");

    let reply = match data.commands.submit(event).await {
        Ok(reply) => reply,
        Err(source) => {
            error!(?source, "command dispatcher unavailable");
            NO_DATA_MESSAGE.to_owned()
        }
    };

    let response = serenity::CreateInteractionResponse::Message(
        serenity::CreateInteractionResponseMessage::new().content(reply),
    );

    if let Err(source) = interaction.create_response(ctx, response).await {
        error!(?source, "failed to reply to unregistered command");
    }
}
