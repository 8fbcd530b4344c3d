pub mod dispatch;

use std::sync::Arc;

use jokebot_store::JokeStore;

use crate::dispatch::CommandQueue;

pub type Error = anyhow::Error;

#[derive(Clone, Debug)]
pub struct Data {
    pub jokes: Arc<JokeStore>,
    pub commands: CommandQueue,
}

impl Data {
    /// Freeze the loaded store and start the command consumer over it.
    pub fn new(jokes: JokeStore) -> Self {
        let jokes = Arc::new(jokes);
        let commands = CommandQueue::spawn(Arc::clone(&jokes));
        Self { jokes, commands }
    }
}

pub type Context<'a> = poise::Context<'a, Data, Error>;
