//! Attachment compression: zip archives and numbered parts.

pub mod compress;
pub mod split;

pub use compress::{archive_path_for, Compressor, SPLIT_THRESHOLD};
pub use split::{join_parts, part_path};
