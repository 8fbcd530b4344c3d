use tracing::error;

use jokebot_core::dispatch::CommandInvoked;
use jokebot_core::{Context, Error};

/// Replies with a joke!
#[poise::command(slash_command, category = "Fun")]
pub async fn joke(ctx: Context<'_>) -> Result<(), Error> {
    let event = CommandInvoked::new(ctx.command().name.as_str());
    let reply = ctx.data().commands.submit(event).await?;

    if let Err(source) = ctx.say(reply).await {
        error!(?source, "failed to deliver joke reply");
    }

    Ok(())
}
