use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use jokebot_store::JokeStore;
use jokebot_utils::formatting::format_joke_reply;

pub const JOKE_COMMAND_NAME: &str = "joke";
pub const NO_DATA_MESSAGE: &str = "No joke data available at the moment";

const QUEUE_CAPACITY: usize = 64;

/// A slash command invocation as seen by the dispatcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandInvoked {
    pub command_name: String,
}

impl CommandInvoked {
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("command dispatcher is no longer running")]
    Closed,
}

/// Compute the reply for one invocation.
pub fn reply_for(store: &JokeStore, event: &CommandInvoked) -> String {
    if event.command_name != JOKE_COMMAND_NAME {
        return NO_DATA_MESSAGE.to_owned();
    }

    match store.pick_random_pair() {
        Some((joke, answer)) => format_joke_reply(&joke.text, &answer.text),
        None => NO_DATA_MESSAGE.to_owned(),
    }
}

#[derive(Debug)]
struct Invocation {
    event: CommandInvoked,
    reply: oneshot::Sender<String>,
}

/// Handle to the task that answers command invocations.
///
/// Every submitted event gets exactly one reply string back. The consumer
/// stops once all handles are dropped.
#[derive(Clone, Debug)]
pub struct CommandQueue {
    tx: mpsc::Sender<Invocation>,
}

impl CommandQueue {
    /// Start the consumer task. Must be called inside a tokio runtime.
    pub fn spawn(store: Arc<JokeStore>) -> Self {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        tokio::spawn(run(store, rx));
        Self { tx }
    }

    pub async fn submit(&self, event: CommandInvoked) -> Result<String, DispatchError> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(Invocation { event, reply })
            .await
            .map_err(|_| DispatchError::Closed)?;
        response.await.map_err(|_| DispatchError::Closed)
    }
}

async fn run(store: Arc<JokeStore>, mut rx: mpsc::Receiver<Invocation>) {
    while let Some(Invocation { event, reply }) = rx.recv().await {
        info!(command = %event.command_name, "received command");
        let text = reply_for(&store, &event);
        if reply.send(text).is_err() {
            debug!(command = %event.command_name, "invoker went away before the reply");
        }
    }

    debug!("command queue closed");
}
