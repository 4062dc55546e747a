//! The parameters of one invocation.

use std::path::PathBuf;

use crate::error::{Result, SenderError};

/// Everything needed to send one file, resolved from the CLI and config file.
///
/// Built once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    /// File to send.
    pub attachment: PathBuf,
    /// `From` address, also used as the SES source.
    pub sender: String,
    /// Destination addresses (never empty).
    pub recipients: Vec<String>,
    /// Subject prefix; every message gets `"{subject} - {file} (i/n)"`.
    pub subject: String,
    /// Plain-text body shared by every part.
    pub body: String,
    /// Zip the attachment before sending.
    pub compress: bool,
}

impl SendRequest {
    /// Create a request, rejecting an empty recipient list.
    pub fn new(
        attachment: impl Into<PathBuf>,
        sender: impl Into<String>,
        recipients: Vec<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
        compress: bool,
    ) -> Result<Self> {
        if recipients.is_empty() {
            return Err(SenderError::MissingArgument("recipient_email"));
        }
        Ok(Self {
            attachment: attachment.into(),
            sender: sender.into(),
            recipients,
            subject: subject.into(),
            body: body.into(),
            compress,
        })
    }
}
