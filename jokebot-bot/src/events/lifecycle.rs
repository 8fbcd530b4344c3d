use std::future::{Future, IntoFuture};
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use tokio::task::JoinHandle;
use tracing::{error, info};

use jokebot_utils::notify::{HttpChannelDirectory, LAUNCH_MESSAGE, SHUTDOWN_MESSAGE, announce};

/// Start listening for SIGINT. The returned handle completes once it arrives.
pub fn listen_for_sigint() -> JoinHandle<()> {
    tokio::spawn(async {
        if let Err(source) = tokio::signal::ctrl_c().await {
            error!(?source, "failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    })
}

/// Drive `work` to completion unless `interrupt` resolves first.
pub async fn unless_interrupted<W, I>(work: W, interrupt: &mut I) -> Option<W::Output>
where
    W: IntoFuture,
    I: Future + Unpin,
{
    tokio::select! {
        output = work.into_future() => Some(output),
        _ = interrupt => None,
    }
}

/// Tell the notification channel the bot is online.
pub async fn announce_launch(http: Arc<serenity::Http>, channel_id: serenity::ChannelId) {
    if announce(&HttpChannelDirectory::new(http), channel_id, LAUNCH_MESSAGE).await {
        info!("Launch message sent.");
    }
}

/// Post the shutdown notice, then disconnect every shard.
pub async fn shutdown(
    http: Arc<serenity::Http>,
    shard_manager: Arc<serenity::ShardManager>,
    channel_id: serenity::ChannelId,
) {
    info!("SIGINT received, shutting down.");

    if announce(&HttpChannelDirectory::new(http), channel_id, SHUTDOWN_MESSAGE).await {
        info!("Shutdown message sent.");
    }

    shard_manager.shutdown_all().await;
    info!("Jokebot has stopped.");
}
