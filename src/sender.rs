//! Sending an attachment as one or more numbered messages.
//!
//! Every file of a [`CompressedArtifact`] becomes its own message, sent in
//! ascending filename order and labelled `(i/N)`. The first failure stops
//! the run; parts already delivered stay delivered.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::archive::Compressor;
use crate::error::{Result, SenderError};
use crate::mail::{build_message, mime, part_title, MailTransport};
use crate::model::artifact::CompressedArtifact;
use crate::model::request::SendRequest;

/// Outcome of one delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SentPart {
    /// 1-based position.
    pub part: usize,
    /// Number of messages in this run.
    pub total: usize,
    /// File that was attached.
    pub path: PathBuf,
    /// Subject the message was sent with.
    pub subject: String,
    /// Identifier assigned by the provider.
    pub message_id: String,
}

/// Drives a [`MailTransport`] over the files of an artifact.
#[derive(Debug)]
pub struct Sender<T> {
    transport: T,
}

impl<T: MailTransport> Sender<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Compress the request's attachment (if asked to) and send the result.
    pub fn send_request(
        &self,
        request: &SendRequest,
        compressor: &Compressor,
    ) -> Result<Vec<SentPart>> {
        if !request.attachment.is_file() {
            return Err(SenderError::FileNotFound(request.attachment.clone()));
        }
        let artifact = compressor.compress(&request.attachment, request.compress)?;
        self.send(request, &artifact)
    }

    /// Send every file of `artifact`, one message each.
    pub fn send(
        &self,
        request: &SendRequest,
        artifact: &CompressedArtifact,
    ) -> Result<Vec<SentPart>> {
        let mut files = artifact.files().to_vec();
        files.sort();

        let attachment_name = file_name(artifact.logical_path());
        let total = files.len();
        let mut sent = Vec::with_capacity(total);

        for (index, path) in files.into_iter().enumerate() {
            let subject = part_title(&request.subject, &attachment_name, index, total);
            tracing::info!(
                part = index + 1,
                total,
                "Preparing to send file: {}",
                path.display()
            );

            let data = std::fs::read(&path).map_err(|e| SenderError::io(&path, e))?;
            let envelope =
                build_message(&request.sender, &request.recipients, &subject, &request.body)
                    .with_attachment(file_name(&path), data);
            let raw = mime::render(&envelope)?;

            let message_id =
                self.transport
                    .send_raw(&raw, &request.sender, &request.recipients)?;
            tracing::info!(
                part = index + 1,
                total,
                "Email sent successfully to {:?}. Message ID: {}",
                request.recipients,
                message_id
            );

            sent.push(SentPart {
                part: index + 1,
                total,
                path,
                subject,
                message_id,
            });
        }

        Ok(sent)
    }
}

/// Final path component as a string, or the whole path if there is none.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
