//! Conversation transcript types.
//!
//! A `Message` is immutable once appended; the `Transcript` is an append-only
//! sequence for one session. Serde derives exist so turns can be persisted
//! through the data store as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Greeting shown as the first bot message of every session.
pub const GREETING: &str = "Hello! I can help you find books based on your \
     interests. What kind of books are you looking for?";

/// Fallback bot message when the recommendation backend fails.
pub const REPLY_ERROR: &str =
    "Sorry, I encountered an error while searching for books. Please try again.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub content: String,
    pub from_bot: bool,
    pub sent_at: DateTime<Utc>,
}

impl Message {
    pub fn from_user(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            from_bot: false,
            sent_at: Utc::now(),
        }
    }

    pub fn from_bot(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            from_bot: true,
            sent_at: Utc::now(),
        }
    }
}

/// Append-only message log for one conversation session.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

impl Transcript {
    /// Creates a transcript opening with the bot greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::from_bot(GREETING)],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::from_user(content))
    }

    pub fn push_bot(&mut self, content: impl Into<String>) -> &Message {
        self.push(Message::from_bot(content))
    }

    fn push(&mut self, message: Message) -> &Message {
        self.messages.push(message);
        self.messages.last().expect("just pushed")
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The latest user/bot exchange, if the transcript currently ends with one.
    /// Used by history persistence after a turn resolves.
    pub fn last_turn(&self) -> Option<(&Message, &Message)> {
        match self.messages.as_slice() {
            [.., user, bot] if !user.from_bot && bot.from_bot => Some((user, bot)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcript_opens_with_greeting() {
        let transcript = Transcript::new();
        assert_eq!(transcript.len(), 1);
        let first = transcript.last().unwrap();
        assert!(first.from_bot);
        assert!(first.content.starts_with("Hello!"));
    }

    #[test]
    fn test_append_order_is_preserved() {
        let mut transcript = Transcript::new();
        transcript.push_user("dinosaur books");
        transcript.push_bot("**Dinosaurs Galore**<br>A romp through the Cretaceous.");
        let contents: Vec<&str> = transcript
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[1], "dinosaur books");
        assert!(!transcript.messages()[1].from_bot);
        assert!(transcript.messages()[2].from_bot);
    }

    #[test]
    fn test_last_turn_requires_user_then_bot() {
        let mut transcript = Transcript::new();
        assert!(transcript.last_turn().is_none());
        transcript.push_user("hi");
        assert!(transcript.last_turn().is_none());
        transcript.push_bot("hello");
        let (user, bot) = transcript.last_turn().unwrap();
        assert_eq!(user.content, "hi");
        assert_eq!(bot.content, "hello");
    }
}
