//! Ordered access levels assigned to agent turns.

use serde::{Deserialize, Serialize};

/// Access level governing which tools an agent turn may call.
///
/// Variants are declared in ascending privilege order, so the derived
/// [`Ord`] implements "at least as privileged as" directly. A higher
/// persona is always a strict superset of the capabilities below it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Persona {
    /// May look up records but not change anything.
    ReadOnly,
    /// May look up records and take routine actions.
    ReadAction,
    /// Unrestricted access to every registered tool.
    Full,
}

impl Persona {
    /// Resolves an external staff-role identifier into a persona.
    ///
    /// Total over all strings: unrecognized roles fall back to the
    /// least-privileged persona rather than erroring.
    #[must_use]
    pub fn resolve(role: &str) -> Self {
        match role {
            "admin" => Self::Full,
            "office_manager" | "billing" => Self::ReadAction,
            // clinical, front_desk, provider, and anything unrecognized
            _ => Self::ReadOnly,
        }
    }

    /// Returns the numeric privilege rank of this persona.
    #[must_use]
    pub const fn rank(self) -> u8 {
        match self {
            Self::ReadOnly => 0,
            Self::ReadAction => 1,
            Self::Full => 2,
        }
    }

    /// Returns the fixed display label for this persona.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ReadOnly => "Read-Only",
            Self::ReadAction => "Read & Action",
            Self::Full => "Full Access",
        }
    }

    /// Returns the fixed human-readable description for this persona.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::ReadOnly => {
                "Can look up patient records and review practice information, \
                 but cannot make changes."
            }
            Self::ReadAction => {
                "Can look up records and take routine actions such as creating \
                 tasks and sending messages to other sections."
            }
            Self::Full => {
                "Unrestricted access to every tool, including administrative \
                 actions."
            }
        }
    }
}

impl std::fmt::Display for Persona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
