//! The delivery seam between the orchestrator and the email provider.

use crate::error::Result;

/// Something that accepts a fully rendered message and delivers it.
///
/// Mirrors the provider's "send raw email" call: raw MIME bytes, a source
/// address and the destination list in, the provider-assigned message id out.
pub trait MailTransport {
    /// Submit one message. Any failure maps to [`SenderError::Transport`]
    /// (or `InvalidAddress` when the provider rejects an address).
    ///
    /// [`SenderError::Transport`]: crate::error::SenderError::Transport
    fn send_raw(&self, raw: &[u8], source: &str, destinations: &[String]) -> Result<String>;
}

impl<T: MailTransport + ?Sized> MailTransport for &T {
    fn send_raw(&self, raw: &[u8], source: &str, destinations: &[String]) -> Result<String> {
        (**self).send_raw(raw, source, destinations)
    }
}

impl<T: MailTransport + ?Sized> MailTransport for Box<T> {
    fn send_raw(&self, raw: &[u8], source: &str, destinations: &[String]) -> Result<String> {
        (**self).send_raw(raw, source, destinations)
    }
}
