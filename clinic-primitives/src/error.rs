//! Shared error definitions for clinic primitives.

use thiserror::Error;

/// Result alias used throughout the clinic agent layer.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while manipulating primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// The supplied string does not name a known practice section.
    #[error("unknown practice section `{section}`")]
    UnknownSection {
        /// The offending identifier string.
        section: String,
    },
}
