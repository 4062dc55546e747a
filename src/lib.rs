//! `ses-sender` — email a local file through AWS SES.
//!
//! The attachment is optionally zipped; an archive larger than the size
//! threshold is cut into numbered parts and each part goes out as its own
//! message labelled `(i/N)`.

pub mod archive;
pub mod config;
pub mod error;
pub mod logging;
pub mod mail;
pub mod model;
pub mod sender;
