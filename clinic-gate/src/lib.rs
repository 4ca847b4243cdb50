//! Persona-based access control over the tool registry.
//!
//! The gate consumes an ordered, read-only sequence of tool descriptors and
//! answers two questions: which tools a persona may see, and whether a
//! persona may call one named tool. It never mutates the registry and never
//! errors on lookups; unknown tool names are simply denied.

#![warn(missing_docs, clippy::pedantic)]

mod descriptor;
mod gate;

/// Registry entry describing a gated tool.
pub use descriptor::ToolDescriptor;
/// The access gate and its construction error.
pub use gate::{AccessGate, GateError, GateResult};
