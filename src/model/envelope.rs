//! Outgoing message before MIME rendering.

use super::attachment::Attachment;

/// Headers, body and at most one attachment of a message about to be sent.
///
/// A fresh envelope is built for every file transmitted and discarded once
/// the cloud API has accepted it. Addresses are kept as plain strings; they
/// are only parsed when the envelope is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// `From` header.
    pub from: String,
    /// `To` header entries, in the order given.
    pub to: Vec<String>,
    /// `Subject` header.
    pub subject: String,
    /// Plain-text body.
    pub body: String,
    /// The binary attachment, if any.
    pub attachment: Option<Attachment>,
}

impl Envelope {
    /// Attach a file's bytes as `application/octet-stream`, replacing any
    /// previous attachment.
    pub fn attach(&mut self, filename: impl Into<String>, data: Vec<u8>) {
        self.attachment = Some(Attachment::octet_stream(filename, data));
    }

    /// Builder-style variant of [`attach`](Self::attach).
    pub fn with_attachment(mut self, filename: impl Into<String>, data: Vec<u8>) -> Self {
        self.attach(filename, data);
        self
    }

    /// The `To` header value: all recipients joined by `", "`.
    pub fn to_header(&self) -> String {
        self.to.join(", ")
    }
}
