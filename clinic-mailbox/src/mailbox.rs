//! The per-conversation message buffer.

use std::sync::Mutex;

use tracing::debug;

use crate::message::{InboxMessage, OutboxMessage};

#[derive(Debug, Default)]
struct MailboxInner {
    inbox: Vec<InboxMessage>,
    outbox: Vec<OutboxMessage>,
}

/// Holds one turn's pending outbox and pre-loaded inbox.
///
/// All operations are synchronous, in-memory, and infallible. The caller
/// serializes turns: exactly one turn is expected to be in flight against a
/// given mailbox at a time, and concurrent conversations get separate
/// instances.
#[derive(Debug, Default)]
pub struct Mailbox {
    inner: Mutex<MailboxInner>,
}

impl Mailbox {
    /// Creates an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the entire inbox with the supplied messages.
    ///
    /// No merging: the last call before a turn wins, and any previous inbox
    /// contents are discarded.
    ///
    /// # Panics
    ///
    /// Panics if the internal mailbox lock is poisoned.
    pub fn set_inbox(&self, messages: Vec<InboxMessage>) {
        let mut inner = self.inner.lock().expect("mailbox poisoned");
        debug!(count = messages.len(), "inbox replaced");
        inner.inbox = messages;
    }

    /// Returns a snapshot of the current inbox, in delivery order.
    ///
    /// Reading never clears the inbox; repeated reads within a turn see the
    /// same contents.
    ///
    /// # Panics
    ///
    /// Panics if the internal mailbox lock is poisoned.
    #[must_use]
    pub fn inbox(&self) -> Vec<InboxMessage> {
        let inner = self.inner.lock().expect("mailbox poisoned");
        inner.inbox.clone()
    }

    /// Appends a message to the pending outbox.
    ///
    /// # Panics
    ///
    /// Panics if the internal mailbox lock is poisoned.
    pub fn push_outbox(&self, message: OutboxMessage) {
        let mut inner = self.inner.lock().expect("mailbox poisoned");
        inner.outbox.push(message);
    }

    /// Atomically takes and clears the pending outbox.
    ///
    /// Messages are returned in the order they were pushed. Every pushed
    /// message appears in exactly one drain; calling with an empty outbox
    /// returns an empty Vec.
    ///
    /// # Panics
    ///
    /// Panics if the internal mailbox lock is poisoned.
    #[must_use]
    pub fn drain_outbox(&self) -> Vec<OutboxMessage> {
        let mut inner = self.inner.lock().expect("mailbox poisoned");
        let drained = std::mem::take(&mut inner.outbox);
        debug!(count = drained.len(), "outbox drained");
        drained
    }
}

#[cfg(test)]
mod tests {
    use clinic_primitives::AgentSection;

    use super::*;
    use crate::message::MessageKind;

    fn note(content: &str) -> OutboxMessage {
        OutboxMessage::new(AgentSection::FrontDesk, content, MessageKind::Message)
    }

    #[test]
    fn drain_returns_messages_once() {
        let mailbox = Mailbox::new();
        mailbox.push_outbox(note("a"));
        mailbox.push_outbox(note("b"));

        let first = mailbox.drain_outbox();
        assert_eq!(first.len(), 2);

        let second = mailbox.drain_outbox();
        assert!(second.is_empty());
    }

    #[test]
    fn drain_preserves_push_order() {
        let mailbox = Mailbox::new();
        for content in ["first", "second", "third"] {
            mailbox.push_outbox(note(content));
        }

        let drained = mailbox.drain_outbox();
        let contents: Vec<_> = drained.iter().map(OutboxMessage::content).collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }

    #[test]
    fn interleaved_sends_and_drains_never_drop_or_duplicate() {
        let mailbox = Mailbox::new();

        mailbox.push_outbox(note("one"));
        let drained = mailbox.drain_outbox();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].content(), "one");

        mailbox.push_outbox(note("two"));
        let drained = mailbox.drain_outbox();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].content(), "two");
    }

    #[test]
    fn drain_of_empty_outbox_is_empty() {
        let mailbox = Mailbox::new();
        assert!(mailbox.drain_outbox().is_empty());
    }

    #[test]
    fn set_inbox_replaces_rather_than_merges() {
        let mailbox = Mailbox::new();
        mailbox.set_inbox(vec![
            InboxMessage::new("scheduling", "Slot open", 100),
            InboxMessage::new("rcm", "Claim paid", 101),
        ]);
        mailbox.set_inbox(vec![InboxMessage::new("clinical", "Chart ready", 102)]);

        let inbox = mailbox.inbox();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].sender(), "clinical");
    }

    #[test]
    fn inbox_reads_do_not_clear() {
        let mailbox = Mailbox::new();
        mailbox.set_inbox(vec![InboxMessage::new("scheduling", "Slot open", 100)]);

        assert_eq!(mailbox.inbox().len(), 1);
        assert_eq!(mailbox.inbox().len(), 1);
    }
}
