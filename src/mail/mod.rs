//! Building, rendering and delivering messages.

pub mod builder;
pub mod eml;
pub mod mime;
pub mod ses;
pub mod transport;

pub use builder::{build_message, part_title};
pub use transport::MailTransport;
