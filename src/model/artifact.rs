//! Output of the compression step.

use std::path::{Path, PathBuf};

/// The file(s) produced for an attachment, in the order they must be sent.
///
/// Files are left on disk after sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompressedArtifact {
    /// Compression was not requested; the original file is sent as-is.
    Uncompressed(PathBuf),
    /// The archive fit under the threshold.
    Single(PathBuf),
    /// The archive was cut into numbered parts, in ascending order.
    Split {
        /// Path the unsplit archive would have had (`report.zip`).
        archive: PathBuf,
        /// `report.zip.part001`, `report.zip.part002`, …
        parts: Vec<PathBuf>,
    },
}

impl CompressedArtifact {
    /// Files to transmit, one message each.
    pub fn files(&self) -> &[PathBuf] {
        match self {
            Self::Uncompressed(path) | Self::Single(path) => std::slice::from_ref(path),
            Self::Split { parts, .. } => parts,
        }
    }

    /// The logical attachment: the original file or the (possibly split) archive.
    pub fn logical_path(&self) -> &Path {
        match self {
            Self::Uncompressed(path) | Self::Single(path) => path,
            Self::Split { archive, .. } => archive,
        }
    }
}
