//! Facade for the clinic agent layer.
//!
//! Depend on this crate via `cargo add clinic-agents`. It bundles the
//! internal crates behind feature flags so the embedding application can
//! enable only the components it needs.

#![warn(missing_docs, clippy::pedantic)]

/// Re-export shared primitives for convenience.
pub use clinic_primitives as primitives;

/// Persona access gate over the tool registry (enabled by `gate` feature).
#[cfg(feature = "gate")]
pub use clinic_gate as gate;

/// Turn-scoped message buffers (enabled by `mailbox` feature).
#[cfg(feature = "mailbox")]
pub use clinic_mailbox as mailbox;

/// Tool catalog, builtin tools, and turn orchestration (enabled by `tools`
/// feature).
#[cfg(feature = "tools")]
pub use clinic_tools as tools;
