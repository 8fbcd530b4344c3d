/// Wrap text in Discord spoiler markup so readers have to click to reveal it.
pub fn spoiler(text: &str) -> String {
    format!("||{}||", text)
}

/// Render a joke with its answer hidden below it.
pub fn format_joke_reply(joke: &str, answer: &str) -> String {
    format!("{}\n{}", joke, spoiler(answer))
}
