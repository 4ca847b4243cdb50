//! Message types carried through the mailbox.

use clinic_primitives::AgentSection;
use serde::{Deserialize, Serialize};

/// Classifies an outgoing message for the receiving section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Routine point-to-point note.
    #[default]
    Message,
    /// Announcement intended for everyone in the receiving section.
    Broadcast,
    /// Urgent issue that needs attention ahead of routine work.
    Escalate,
}

impl MessageKind {
    /// Every message kind, in schema enumeration order.
    pub const ALL: [Self; 3] = [Self::Message, Self::Broadcast, Self::Escalate];

    /// Returns the wire identifier for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::Broadcast => "broadcast",
            Self::Escalate => "escalate",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A message queued during a turn for delivery to another section.
///
/// `content` is the canonical, untruncated text; any shortening for display
/// happens at the rendering layer, never here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxMessage {
    to_agent: AgentSection,
    content: String,
    kind: MessageKind,
}

impl OutboxMessage {
    /// Creates a message addressed to the given section.
    #[must_use]
    pub fn new(to_agent: AgentSection, content: impl Into<String>, kind: MessageKind) -> Self {
        Self {
            to_agent,
            content: content.into(),
            kind,
        }
    }

    /// Returns the receiving section.
    #[must_use]
    pub fn to_agent(&self) -> AgentSection {
        self.to_agent
    }

    /// Returns the full message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the message classification.
    #[must_use]
    pub fn kind(&self) -> MessageKind {
        self.kind
    }
}

/// A message delivered to this turn's inbox by the embedding application.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboxMessage {
    from: String,
    content: String,
    timestamp: i64,
}

impl InboxMessage {
    /// Creates an inbox message from the given sender.
    #[must_use]
    pub fn new(from: impl Into<String>, content: impl Into<String>, timestamp: i64) -> Self {
        Self {
            from: from.into(),
            content: content.into(),
            timestamp,
        }
    }

    /// Returns the sending section or system identifier.
    #[must_use]
    pub fn sender(&self) -> &str {
        &self.from
    }

    /// Returns the message content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the delivery timestamp assigned by the embedding application.
    #[must_use]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_kind_defaults_to_message() {
        assert_eq!(MessageKind::default(), MessageKind::Message);
    }

    #[test]
    fn outbox_message_serializes_with_snake_case_fields() {
        let msg = OutboxMessage::new(AgentSection::Rcm, "claim denied", MessageKind::Escalate);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["to_agent"], "rcm");
        assert_eq!(value["kind"], "escalate");
        assert_eq!(value["content"], "claim denied");
    }
}
