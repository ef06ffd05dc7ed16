//! Error types for the talker.

use crate::names::NameKind;
use thiserror::Error;

/// Dynamic error type that can be sent and shared between threads.
pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up or running a talker.
#[derive(Debug, Error)]
pub enum Error {
    /// Shutdown was requested while blocked in a sleep or a publish.
    ///
    /// This is the expected way for a loop to end and is turned into a
    /// normal stop by [`Talker::run`](crate::talker::Talker::run).
    #[error("interrupted by shutdown request")]
    Interrupted,

    /// Invalid ROS2 name (node, topic or namespace).
    #[error("Invalid {kind} name '{name}': {reason}")]
    InvalidName {
        /// The kind of name that failed validation.
        kind: NameKind,
        /// The invalid name.
        name: String,
        /// The reason the name is invalid.
        reason: String,
    },

    /// Rate frequency is not a positive finite number.
    #[error("Invalid rate: {0} Hz")]
    InvalidRate(f64),

    /// CDR serialization error.
    #[error("CDR serialization error: {0}")]
    Cdr(String),

    /// The clock could not be read.
    #[error("Clock error: {0}")]
    Clock(String),

    /// Error reported by the middleware backend.
    #[error("Middleware error: {0}")]
    Middleware(String),
}

impl Error {
    /// Returns `true` if this error signals a shutdown rather than a failure.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::Interrupted)
    }
}
