//! Dry-run delivery: write each message as an `.eml` file instead of sending it.

use std::cell::Cell;
use std::path::PathBuf;

use crate::error::{Result, SenderError};

use super::transport::MailTransport;

/// Writes every submitted message to `<dir>/message-NNN.eml`.
///
/// Message ids are synthetic (`dry-run-N`). Nothing touches the network.
#[derive(Debug)]
pub struct EmlTransport {
    dir: PathBuf,
    sent: Cell<usize>,
}

impl EmlTransport {
    /// Create the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|e| SenderError::io(&dir, e))?;
        Ok(Self {
            dir,
            sent: Cell::new(0),
        })
    }
}

impl MailTransport for EmlTransport {
    fn send_raw(&self, raw: &[u8], source: &str, destinations: &[String]) -> Result<String> {
        let n = self.sent.get() + 1;
        let path = self.dir.join(format!("message-{n:03}.eml"));
        std::fs::write(&path, raw).map_err(|e| SenderError::io(&path, e))?;
        self.sent.set(n);

        tracing::debug!(
            path = %path.display(),
            source,
            destinations = ?destinations,
            "Wrote message instead of sending"
        );
        Ok(format!("dry-run-{n}"))
    }
}
