//! Transcript-related types.

use std::fmt::{self, Display};

use chrono::{DateTime, Local};

/// Identifies a message within its transcript.
///
/// Ids follow insertion order, so a later message always has a greater id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageId(u64);

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "msg:{}", self.0)
    }
}

/// Who authored a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Typed by the user.
    User,
    /// Produced by the assistant, including apologies for failures.
    Assistant,
}

/// A message in the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    id: MessageId,
    role: Role,
    content: String,
    created_at: DateTime<Local>,
}

impl ChatMessage {
    /// Returns the id of this message.
    #[inline]
    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Returns who authored this message.
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the text of this message.
    #[inline]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when this message was appended.
    ///
    /// This is for display only, transcript order never depends on it.
    #[inline]
    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    /// Formats the creation time as `HH:MM`.
    pub fn display_time(&self) -> String {
        self.created_at.format("%H:%M").to_string()
    }
}

/// An ordered, append-only log of chat messages.
///
/// There is no way to remove or edit a message once it is appended.
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    /// Creates an empty transcript.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message after all the existing ones and returns it.
    pub fn append<S: Into<String>>(
        &mut self,
        role: Role,
        content: S,
    ) -> &ChatMessage {
        let id = MessageId(self.messages.len() as u64);
        self.messages.push(ChatMessage {
            id,
            role,
            content: content.into(),
            created_at: Local::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    /// Returns all the messages in insertion order.
    #[inline]
    pub fn all(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the most recent message.
    #[inline]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns `true` if nothing has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_append_keeps_order() {
        let mut transcript = Transcript::new();
        assert!(transcript.is_empty());

        transcript.append(Role::Assistant, "Bonjour !");
        transcript.append(Role::User, "Golf 2020");
        transcript.append(Role::Assistant, "15000 €");

        let contents: Vec<_> =
            transcript.all().iter().map(ChatMessage::content).collect();
        assert_eq!(contents, ["Bonjour !", "Golf 2020", "15000 €"]);
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.last().unwrap().role(), Role::Assistant);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut transcript = Transcript::new();
        for i in 0..10 {
            transcript.append(Role::User, format!("message {i}"));
        }

        let ids: Vec<_> = transcript.all().iter().map(|m| m.id()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
        assert_eq!(ids[3].to_string(), "msg:3");
    }

    #[test]
    fn test_display_time() {
        let mut transcript = Transcript::new();
        let message = transcript.append(Role::User, "Clio 2019");
        let time = message.display_time();
        assert_eq!(time.len(), 5);
        assert_eq!(&time[2..3], ":");
        assert_eq!(time, message.created_at().format("%H:%M").to_string());
    }
}
