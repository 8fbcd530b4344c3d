use rand::Rng;

use crate::model::{AnswerEntry, JokeEntry};

/// Jokes and answers loaded once at startup.
///
/// The two collections are joined by position: the joke at index `i` goes
/// with the answer at index `i`. Share it behind an `Arc` once loaded; nothing
/// mutates it afterwards.
#[derive(Clone, Debug, Default)]
pub struct JokeStore {
    jokes: Vec<JokeEntry>,
    answers: Vec<AnswerEntry>,
}

impl JokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held collections.
    pub fn load(&mut self, jokes: Vec<JokeEntry>, answers: Vec<AnswerEntry>) {
        self.jokes = jokes;
        self.answers = answers;
    }

    /// True when either collection has no entries.
    pub fn is_empty(&self) -> bool {
        self.jokes.is_empty() || self.answers.is_empty()
    }

    /// Number of index-aligned pairs available.
    pub fn pair_count(&self) -> usize {
        self.jokes.len().min(self.answers.len())
    }

    /// Pick a uniformly random pair using the thread-local RNG.
    pub fn pick_random_pair(&self) -> Option<(&JokeEntry, &AnswerEntry)> {
        self.pick_pair_with(&mut rand::rng())
    }

    /// Pick a uniformly random pair from `[0, pair_count())`.
    pub fn pick_pair_with<R: Rng>(&self, rng: &mut R) -> Option<(&JokeEntry, &AnswerEntry)> {
        if self.is_empty() {
            return None;
        }

        let index = rng.random_range(0..self.pair_count());
        Some((&self.jokes[index], &self.answers[index]))
    }
}
