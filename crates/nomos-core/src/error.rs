//! Error types for Nomos core operations.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating the access data model.
#[derive(Error, Debug)]
pub enum Error {
    /// A role declares a session duration outside the allowed range.
    #[error(
        "Role \"{role}\" declares maxSessionDuration {seconds}, allowed range is {min}-{max} seconds"
    )]
    SessionDurationOutOfRange {
        /// Name of the offending role.
        role: String,
        /// The declared duration in seconds.
        seconds: u32,
        /// Lower bound of the allowed range.
        min: u32,
        /// Upper bound of the allowed range.
        max: u32,
    },
}
