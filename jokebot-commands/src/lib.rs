pub mod fun;

use jokebot_core::{Data, Error};

pub fn commands() -> Vec<poise::Command<Data, Error>> {
    vec![fun::joke::joke()]
}
