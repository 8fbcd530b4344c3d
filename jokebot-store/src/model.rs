use serde::Deserialize;

/// One joke prompt as served by the joke API.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct JokeEntry {
    pub id: i64,
    #[serde(rename = "joke")]
    pub text: String,
}

/// One punchline. Paired with the [`JokeEntry`] at the same index, not by `id`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AnswerEntry {
    pub id: i64,
    #[serde(rename = "answer")]
    pub text: String,
}

/// Response body of `GET /joke`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct JokePayload {
    pub joke: Vec<JokeEntry>,
    pub answer: Vec<AnswerEntry>,
}
