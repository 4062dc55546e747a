//! AWS SES delivery through `SendRawEmail`.
//!
//! Credentials come from the SDK's default provider chain (environment,
//! shared config/credentials files, instance metadata). The SDK is async;
//! a private current-thread runtime drives it so callers stay synchronous.

use aws_config::BehaviorVersion;
use aws_sdk_ses::config::Region;
use aws_sdk_ses::error::DisplayErrorContext;
use aws_sdk_ses::primitives::Blob;
use aws_sdk_ses::types::RawMessage;
use aws_sdk_ses::Client;
use tokio::runtime::Runtime;

use crate::error::{Result, SenderError};

use super::transport::MailTransport;

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Sends raw messages through Amazon SES.
pub struct SesTransport {
    client: Client,
    runtime: Runtime,
}

impl SesTransport {
    /// Load AWS configuration for `region` and create an SES client.
    ///
    /// Missing credentials are not detected here; they surface as a
    /// transport error on the first send.
    pub fn new(region: impl Into<String>) -> Result<Self> {
        let region = region.into();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| SenderError::Transport(format!("could not start runtime: {e}")))?;

        let config = runtime.block_on(
            aws_config::defaults(BehaviorVersion::latest())
                .region(Region::new(region.clone()))
                .load(),
        );
        tracing::debug!(region = %region, "SES client configured");

        Ok(Self {
            client: Client::new(&config),
            runtime,
        })
    }
}

impl MailTransport for SesTransport {
    fn send_raw(&self, raw: &[u8], source: &str, destinations: &[String]) -> Result<String> {
        let message = RawMessage::builder()
            .data(Blob::new(raw.to_vec()))
            .build()
            .map_err(|e| SenderError::Message(e.to_string()))?;

        let request = self
            .client
            .send_raw_email()
            .source(source)
            .set_destinations(Some(destinations.to_vec()))
            .raw_message(message)
            .send();

        let output = self
            .runtime
            .block_on(request)
            .map_err(|e| SenderError::Transport(DisplayErrorContext(&e).to_string()))?;

        Ok(output.message_id().to_string())
    }
}
