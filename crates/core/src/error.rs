//! Error taxonomy for the editor core.

use thiserror::Error;

/// Errors raised by the session and its commands.
#[derive(Debug, Error)]
pub enum Error {
    /// A built-in binding table entry is malformed. Fatal at startup.
    #[error("invalid default binding: {0}")]
    Config(String),

    /// Recoverable; shown in the echo area, no state is changed.
    #[error("{0}")]
    UserInput(String),

    /// A window too small to hold text and a status line.
    #[error("window of {height} rows by {width} columns is too small")]
    TooSmallWindow { width: usize, height: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a recoverable user-facing error.
    pub fn user(message: impl Into<String>) -> Self {
        Error::UserInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
