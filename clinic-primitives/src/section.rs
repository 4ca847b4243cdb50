//! Practice-section identifiers used to route inter-agent messages.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A section of the practice that can send and receive mailbox messages.
///
/// This is the closed set of addressable recipients; messages cannot be
/// routed to arbitrary strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentSection {
    /// Reception and patient intake.
    FrontDesk,
    /// Appointment scheduling.
    Scheduling,
    /// Clinical staff and providers.
    Clinical,
    /// Revenue cycle management (billing and claims).
    Rcm,
    /// Practice administration.
    OfficeManager,
}

impl AgentSection {
    /// Every addressable section, in a fixed order suitable for parameter
    /// schema enumerations.
    pub const ALL: [Self; 5] = [
        Self::FrontDesk,
        Self::Scheduling,
        Self::Clinical,
        Self::Rcm,
        Self::OfficeManager,
    ];

    /// Returns the wire identifier for this section.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FrontDesk => "front_desk",
            Self::Scheduling => "scheduling",
            Self::Clinical => "clinical",
            Self::Rcm => "rcm",
            Self::OfficeManager => "office_manager",
        }
    }
}

impl FromStr for AgentSection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| Error::UnknownSection { section: s.into() })
    }
}

impl std::fmt::Display for AgentSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
