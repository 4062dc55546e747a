//! Centralized error types for ses-sender.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the ses-sender library.
#[derive(Error, Debug)]
pub enum SenderError {
    /// I/O error with the associated file path.
    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The attachment (or a part) does not exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Writing or reading the zip archive failed.
    #[error("Archive error for '{path}': {reason}")]
    Archive { path: PathBuf, reason: String },

    /// An address could not be parsed while rendering the message.
    #[error("Invalid email address '{address}': {reason}")]
    InvalidAddress { address: String, reason: String },

    /// The MIME message could not be assembled.
    #[error("Could not build message: {0}")]
    Message(String),

    /// The cloud email API rejected the request or could not be reached.
    #[error("Failed to send email: {0}")]
    Transport(String),

    /// A required parameter was given neither on the command line nor in the config file.
    #[error("Missing required argument: {0}")]
    MissingArgument(&'static str),

    /// The configuration file could not be read or parsed.
    #[error("Invalid configuration in '{path}': {reason}")]
    Config { path: PathBuf, reason: String },
}

/// Convenience alias for `Result<T, SenderError>`.
pub type Result<T> = std::result::Result<T, SenderError>;

impl SenderError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create an `Archive` variant from a path and any displayable cause.
    pub fn archive(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Archive {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// `true` for failures that come back from the delivery step.
    ///
    /// These are logged and turned into exit code 1 by the binary; every
    /// other error is treated as fatal and bubbles up unchanged.
    pub fn is_delivery_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::InvalidAddress { .. })
    }
}

/// Allow `?` on `std::io::Error` when no path context is available
/// (rare, prefer `SenderError::io`).
impl From<std::io::Error> for SenderError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
