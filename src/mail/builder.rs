//! Envelope construction.

use crate::model::envelope::Envelope;

/// Build an envelope with no attachment.
///
/// Addresses are taken verbatim; malformed input is only reported when the
/// envelope is rendered or submitted.
pub fn build_message(sender: &str, recipients: &[String], subject: &str, body: &str) -> Envelope {
    Envelope {
        from: sender.to_string(),
        to: recipients.to_vec(),
        subject: subject.to_string(),
        body: body.to_string(),
        attachment: None,
    }
}

/// Subject of part `index` (0-based) out of `total`.
///
/// Format: `"{subject} - {attachment} ({index + 1}/{total})"`.
pub fn part_title(subject: &str, attachment: &str, index: usize, total: usize) -> String {
    format!("{subject} - {attachment} ({}/{total})", index + 1)
}
