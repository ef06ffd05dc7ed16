//! Error types for talker-zenoh.
//!
//! Wraps `talker-core` errors and Zenoh errors, and converts back into
//! [`talker_core::Error`] at the trait boundary.

use thiserror::Error;

/// Result type for talker-zenoh operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in talker-zenoh.
#[derive(Debug, Error)]
pub enum Error {
    /// Core error from talker-core
    #[error("{0}")]
    Core(#[from] talker_core::Error),

    /// Zenoh session error
    #[error("Zenoh error: {0}")]
    Zenoh(#[from] zenoh::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed message attachment
    #[doc(hidden)]
    #[error("Invalid attachment: {0}")]
    InvalidAttachment(String),
}

impl Error {
    /// Returns `true` if the context was shut down.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, Error::Core(e) if e.is_interrupted())
    }
}

impl From<Error> for talker_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Core(e) => e,
            Error::Zenoh(e) => talker_core::Error::Middleware(e.to_string()),
            Error::InvalidConfig(msg) => {
                talker_core::Error::Middleware(format!("invalid configuration: {msg}"))
            }
            Error::InvalidAttachment(msg) => {
                talker_core::Error::Middleware(format!("invalid attachment: {msg}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_roundtrip() {
        let err: Error = talker_core::Error::Interrupted.into();
        assert!(err.is_interrupted());
        assert!(matches!(
            talker_core::Error::from(err),
            talker_core::Error::Interrupted
        ));
    }

    #[test]
    fn test_config_error_is_middleware() {
        let err = Error::InvalidConfig("missing file".into());
        assert!(!err.is_interrupted());
        assert!(matches!(
            talker_core::Error::from(err),
            talker_core::Error::Middleware(_)
        ));
    }
}
