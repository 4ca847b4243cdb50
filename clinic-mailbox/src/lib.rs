//! Turn-scoped message buffers for inter-section agent messaging.
//!
//! A [`Mailbox`] carries messages for the duration of a single agent turn:
//! the embedding application loads the inbox before the turn, tool handlers
//! read it and append to the outbox during the turn, and the application
//! drains the outbox afterwards for persistence. Nothing here survives
//! across turns; durable storage is the caller's concern.
//!
//! One mailbox instance serves one conversation. Callers running several
//! conversations create one mailbox per conversation rather than sharing a
//! single instance.

#![warn(missing_docs, clippy::pedantic)]

mod mailbox;
mod message;

/// The per-conversation message buffer.
pub use mailbox::Mailbox;
/// Message types carried through the mailbox.
pub use message::{InboxMessage, MessageKind, OutboxMessage};
