//! Binary attachment carried by an outgoing envelope.
//!
//! The payload is read fully into memory right before the envelope is
//! rendered and dropped together with it once the part is submitted.

/// MIME type used for every attachment, archive parts included.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A file attached to an [`Envelope`](super::envelope::Envelope).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Filename announced in the `Content-Disposition` header.
    pub filename: String,

    /// MIME content type (always [`OCTET_STREAM`] for files sent by this tool).
    pub content_type: String,

    /// Raw file bytes.
    pub data: Vec<u8>,
}

impl Attachment {
    /// Create a generic binary attachment.
    pub fn octet_stream(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: OCTET_STREAM.to_string(),
            data,
        }
    }
}
