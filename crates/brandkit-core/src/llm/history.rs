//! Transcript to completion-message mapping.

use brandkit_types::brand::{Speaker, Transcript};
use brandkit_types::llm::Message;

/// Map the transcript onto completion messages, then append `utterance`.
///
/// User lines become `user` messages; everything the bot said becomes
/// `assistant`. The transcript is sent whole on every turn.
pub fn conversation_messages(transcript: &Transcript, utterance: &str) -> Vec<Message> {
    let mut messages: Vec<Message> = transcript
        .entries()
        .iter()
        .map(|entry| match entry.speaker {
            Speaker::User => Message::user(entry.text.clone()),
            Speaker::Bot => Message::assistant(entry.text.clone()),
        })
        .collect();
    messages.push(Message::user(utterance));
    messages
}
