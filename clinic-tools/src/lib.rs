//! Tool catalog, builtin tools, and turn orchestration.
//!
//! The catalog holds every tool the assistant can expose, each described by
//! a name, a JSON parameter schema, and the minimum persona required to call
//! it. A [`turn::TurnContext`] ties one conversation's persona, gate, and
//! mailbox together for the duration of a single agent invocation.

#![warn(missing_docs, clippy::pedantic)]

pub mod builtin;
pub mod catalog;
pub mod task;
pub mod turn;
