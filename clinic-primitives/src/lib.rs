//! Core shared types for the clinic agent layer.

#![warn(missing_docs, clippy::pedantic)]

mod error;
mod persona;
mod section;

/// Error type and result alias shared across the workspace.
pub use error::{Error, Result};
/// Ordered access levels and role resolution.
pub use persona::Persona;
/// Practice-section identifiers used for message routing.
pub use section::AgentSection;
