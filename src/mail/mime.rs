//! Rendering envelopes to RFC 5322 bytes.
//!
//! A message with an attachment is `multipart/mixed` with a `text/plain`
//! body first and the file second; without one it is a single
//! `text/plain` part.

use lettre::message::header::ContentType;
use lettre::message::{Attachment as MimeAttachment, Mailbox, MultiPart, SinglePart};
use lettre::Message;

use crate::error::{Result, SenderError};
use crate::model::envelope::Envelope;

/// Render `envelope` to raw message bytes ready for `SendRawEmail`.
pub fn render(envelope: &Envelope) -> Result<Vec<u8>> {
    let mut builder = Message::builder()
        .from(parse_mailbox(&envelope.from)?)
        .subject(envelope.subject.as_str());
    for recipient in &envelope.to {
        builder = builder.to(parse_mailbox(recipient)?);
    }

    let text = SinglePart::plain(envelope.body.clone());
    let message = match &envelope.attachment {
        Some(attachment) => {
            let content_type = ContentType::parse(&attachment.content_type)
                .map_err(|e| SenderError::Message(format!("{}: {e}", attachment.content_type)))?;
            let file = MimeAttachment::new(attachment.filename.clone())
                .body(attachment.data.clone(), content_type);
            builder.multipart(MultiPart::mixed().singlepart(text).singlepart(file))
        }
        None => builder.singlepart(text),
    }
    .map_err(|e| SenderError::Message(e.to_string()))?;

    Ok(message.formatted())
}

fn parse_mailbox(address: &str) -> Result<Mailbox> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| SenderError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}
