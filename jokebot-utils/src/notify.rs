use std::future::Future;
use std::sync::Arc;

use poise::serenity_prelude as serenity;
use thiserror::Error;
use tracing::{error, info};

pub const LAUNCH_MESSAGE: &str = "Jokebot is up and running!";
pub const SHUTDOWN_MESSAGE: &str = "JokeBot has stopped responding!";

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("failed to fetch channel {channel_id}: {source}")]
    Fetch {
        channel_id: serenity::ChannelId,
        #[source]
        source: serenity::Error,
    },
    #[error("channel {channel_id} is not a text channel (found {kind})")]
    NotText {
        channel_id: serenity::ChannelId,
        kind: String,
    },
    #[error("failed to send to channel {channel_id}: {source}")]
    Send {
        channel_id: serenity::ChannelId,
        #[source]
        source: serenity::Error,
    },
}

/// A channel lookup result. Only text channels can be written to.
#[derive(Debug)]
pub enum ResolvedChannel<T> {
    Text(T),
    Other { kind: String },
}

pub trait TextChannel {
    fn send_text(&self, text: &str) -> impl Future<Output = Result<(), serenity::Error>> + Send;
}

pub trait ChannelDirectory {
    type Text: TextChannel + Send + Sync;

    fn resolve(
        &self,
        channel_id: serenity::ChannelId,
    ) -> impl Future<Output = Result<ResolvedChannel<Self::Text>, serenity::Error>> + Send;
}

/// Channel lookups backed by the Discord REST API.
#[derive(Clone)]
pub struct HttpChannelDirectory {
    http: Arc<serenity::Http>,
}

impl HttpChannelDirectory {
    pub fn new(http: Arc<serenity::Http>) -> Self {
        Self { http }
    }
}

pub struct HttpTextChannel {
    http: Arc<serenity::Http>,
    id: serenity::ChannelId,
}

impl TextChannel for HttpTextChannel {
    async fn send_text(&self, text: &str) -> Result<(), serenity::Error> {
        self.id.say(&self.http, text).await?;
        Ok(())
    }
}

impl ChannelDirectory for HttpChannelDirectory {
    type Text = HttpTextChannel;

    async fn resolve(
        &self,
        channel_id: serenity::ChannelId,
    ) -> Result<ResolvedChannel<HttpTextChannel>, serenity::Error> {
        let resolved = match self.http.get_channel(channel_id).await? {
            serenity::Channel::Guild(channel) if channel.kind == serenity::ChannelType::Text => {
                ResolvedChannel::Text(HttpTextChannel {
                    http: Arc::clone(&self.http),
                    id: channel.id,
                })
            }
            serenity::Channel::Guild(channel) => ResolvedChannel::Other {
                kind: format!("{:?}", channel.kind),
            },
            serenity::Channel::Private(_) => ResolvedChannel::Other {
                kind: "private".to_owned(),
            },
            _ => ResolvedChannel::Other {
                kind: "unknown".to_owned(),
            },
        };

        Ok(resolved)
    }
}

/// Resolve `channel_id` and post `text` to it.
pub async fn notify<D: ChannelDirectory>(
    directory: &D,
    channel_id: serenity::ChannelId,
    text: &str,
) -> Result<(), NotifyError> {
    let channel = directory
        .resolve(channel_id)
        .await
        .map_err(|source| NotifyError::Fetch { channel_id, source })?;

    match channel {
        ResolvedChannel::Text(channel) => channel
            .send_text(text)
            .await
            .map_err(|source| NotifyError::Send { channel_id, source }),
        ResolvedChannel::Other { kind } => Err(NotifyError::NotText { channel_id, kind }),
    }
}

/// Best-effort [`notify`]. Failures are logged, never returned.
pub async fn announce<D: ChannelDirectory>(
    directory: &D,
    channel_id: serenity::ChannelId,
    text: &str,
) -> bool {
    match notify(directory, channel_id, text).await {
        Ok(()) => {
            info!(%channel_id, message = text, "notification sent");
            true
        }
        Err(source) => {
            error!(?source, "failed to send notification");
            false
        }
    }
}
