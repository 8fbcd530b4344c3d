use std::env;
use std::fmt;

use anyhow::{Context as _, anyhow, ensure};
use poise::serenity_prelude as serenity;

/// Startup configuration read from the process environment.
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub application_id: serenity::ApplicationId,
    pub guild_id: serenity::GuildId,
    pub channel_id: serenity::ChannelId,
    pub api_url: String,
}

impl BotConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            token: required(&lookup, "DISCORD_BOT_TOKEN")?,
            application_id: serenity::ApplicationId::new(required_id(&lookup, "DISCORD_CLIENT_ID")?),
            guild_id: serenity::GuildId::new(required_id(&lookup, "DISCORD_GUILD_ID")?),
            channel_id: serenity::ChannelId::new(required_id(&lookup, "DISCORD_CHANNEL_ID")?),
            api_url: required(&lookup, "API_URL")?,
        })
    }
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("application_id", &self.application_id)
            .field("guild_id", &self.guild_id)
            .field("channel_id", &self.channel_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

fn required<F>(lookup: &F, key: &str) -> anyhow::Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| anyhow!("missing required environment variable `{key}`"))
}

// Discord snowflakes are never zero, and serenity's id constructors panic on it.
fn required_id<F>(lookup: &F, key: &str) -> anyhow::Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    let id = required(lookup, key)?
        .parse::<u64>()
        .with_context(|| format!("`{key}` must be a numeric Discord id"))?;
    ensure!(id != 0, "`{key}` must be a non-zero Discord id");
    Ok(id)
}
