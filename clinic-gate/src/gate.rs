//! The persona access gate.

use std::collections::HashSet;

use clinic_primitives::Persona;
use thiserror::Error;
use tracing::debug;

use crate::descriptor::ToolDescriptor;

/// Errors surfaced while constructing an access gate.
#[derive(Debug, Error)]
pub enum GateError {
    /// Two registry entries carried the same tool name.
    #[error("tool `{name}` appears more than once in the registry")]
    DuplicateTool {
        /// Name of the offending tool.
        name: String,
    },
}

/// Result alias for gate operations.
pub type GateResult<T> = Result<T, GateError>;

/// Answers tool-access queries for personas against a fixed registry.
///
/// The registry sequence is captured once at construction and never
/// mutated; all query methods are pure.
#[derive(Debug, Clone)]
pub struct AccessGate {
    registry: Vec<ToolDescriptor>,
}

impl AccessGate {
    /// Builds a gate over the supplied registry.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::DuplicateTool`] when two entries share a name.
    pub fn new(registry: Vec<ToolDescriptor>) -> GateResult<Self> {
        let mut seen = HashSet::new();
        for entry in &registry {
            if !seen.insert(entry.name()) {
                return Err(GateError::DuplicateTool {
                    name: entry.name().to_owned(),
                });
            }
        }
        Ok(Self { registry })
    }

    /// Returns the names of every tool the persona may call, preserving
    /// registry order.
    #[must_use]
    pub fn allowed_tools(&self, persona: Persona) -> Vec<&str> {
        self.registry
            .iter()
            .filter(|entry| entry.min_persona() <= persona)
            .map(ToolDescriptor::name)
            .collect()
    }

    /// Reports whether the persona may call the named tool.
    ///
    /// Unknown tool names are denied for every persona.
    #[must_use]
    pub fn can_use_tool(&self, persona: Persona, tool_name: &str) -> bool {
        let Some(entry) = self.registry.iter().find(|e| e.name() == tool_name) else {
            debug!(tool = tool_name, "access check against unregistered tool");
            return false;
        };
        persona >= entry.min_persona()
    }

    /// Returns the underlying registry entries in order.
    #[must_use]
    pub fn registry(&self) -> &[ToolDescriptor] {
        &self.registry
    }
}
