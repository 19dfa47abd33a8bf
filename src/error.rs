//! Error types
//!
//! The cache itself is infallible. Errors only arise when loading notes from
//! their source and when parsing console input.

use thiserror::Error;

// == Fetch Error ==
/// Failure to load a note from its source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The source has no note with this id
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Transient failure (network, timeout, 5xx); worth retrying
    #[error("Note source unavailable: {0}")]
    Unavailable(String),

    /// Permanent failure (unauthorized, malformed response)
    #[error("Note request rejected: {0}")]
    Rejected(String),

    /// Every attempt failed with a transient error
    #[error("Fetching note '{id}' failed after {attempts} attempts: {last}")]
    Exhausted {
        id: String,
        attempts: u32,
        last: Box<FetchError>,
    },
}

impl FetchError {
    /// Whether another attempt could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Unavailable(_))
    }
}

// == Console Error ==
/// Invalid input on the diagnostics console.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument for '{command}': {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

// == Result Type Alias ==
/// Convenience Result type for note fetches.
pub type Result<T> = std::result::Result<T, FetchError>;
