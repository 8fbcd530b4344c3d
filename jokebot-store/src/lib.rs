pub mod loader;
pub mod model;
pub mod store;

pub use loader::{DataUnavailable, fetch_all, joke_endpoint, load_or_empty};
pub use model::{AnswerEntry, JokeEntry, JokePayload};
pub use store::JokeStore;
