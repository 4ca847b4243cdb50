//! Registry entries consumed by the access gate.

use clinic_primitives::Persona;
use serde::{Deserialize, Serialize};

/// Describes one tool in the static registry: its unique name and the
/// minimum persona required to call it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    name: String,
    min_persona: Persona,
}

impl ToolDescriptor {
    /// Creates a descriptor for the supplied tool name and minimum persona.
    #[must_use]
    pub fn new(name: impl Into<String>, min_persona: Persona) -> Self {
        Self {
            name: name.into(),
            min_persona,
        }
    }

    /// Returns the tool name. Unique within a registry; this is the sole
    /// addressable key for access checks.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the minimum persona required to call the tool.
    #[must_use]
    pub fn min_persona(&self) -> Persona {
        self.min_persona
    }
}
