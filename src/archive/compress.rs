//! Whole-file zip compression with size-bounded splitting.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use humansize::{format_size, BINARY};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::error::{Result, SenderError};
use crate::model::artifact::CompressedArtifact;

use super::split;

/// Largest archive (or archive part) sent in a single message, in bytes.
pub const SPLIT_THRESHOLD: u64 = 5_000_000;

/// Deflate level used for every archive.
const COMPRESSION_LEVEL: i64 = 9;

/// Turns an attachment into the file(s) that will actually be sent.
#[derive(Debug, Clone, Copy)]
pub struct Compressor {
    threshold: u64,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor {
    /// Compressor using [`SPLIT_THRESHOLD`].
    pub fn new() -> Self {
        Self::with_threshold(SPLIT_THRESHOLD)
    }

    /// Compressor with a custom part size. Zero is treated as one byte.
    pub fn with_threshold(threshold: u64) -> Self {
        Self {
            threshold: threshold.max(1),
        }
    }

    /// Compress `path` if `enabled`, splitting the archive when it is too large.
    ///
    /// Output is written next to the source. Existing files with the same
    /// names are overwritten; the source is never touched.
    pub fn compress(&self, path: &Path, enabled: bool) -> Result<CompressedArtifact> {
        if !enabled {
            return Ok(CompressedArtifact::Uncompressed(path.to_path_buf()));
        }
        if !path.is_file() {
            return Err(SenderError::FileNotFound(path.to_path_buf()));
        }

        let source_size = std::fs::metadata(path)
            .map_err(|e| SenderError::io(path, e))?
            .len();
        tracing::info!(
            path = %path.display(),
            size = %format_size(source_size, BINARY),
            "Compressing the file"
        );

        let archive = archive_path_for(path);
        write_zip(path, &archive, source_size)?;

        let archive_size = std::fs::metadata(&archive)
            .map_err(|e| SenderError::io(&archive, e))?
            .len();

        if archive_size <= self.threshold {
            tracing::info!(
                archive = %archive.display(),
                size = %format_size(archive_size, BINARY),
                "Archive created"
            );
            return Ok(CompressedArtifact::Single(archive));
        }

        let parts = split::split_file(&archive, self.threshold)?;
        std::fs::remove_file(&archive).map_err(|e| SenderError::io(&archive, e))?;
        tracing::info!(
            archive = %archive.display(),
            size = %format_size(archive_size, BINARY),
            parts = parts.len(),
            "Archive exceeds {} and was split",
            format_size(self.threshold, BINARY)
        );

        Ok(CompressedArtifact::Split { archive, parts })
    }
}

/// Archive path for a source file: same directory and stem, `.zip` extension.
///
/// A source that already ends in `.zip` gets a second `.zip` appended so
/// the archive never overwrites it.
pub fn archive_path_for(path: &Path) -> PathBuf {
    let candidate = path.with_extension("zip");
    if candidate == path {
        let mut name = path.as_os_str().to_owned();
        name.push(".zip");
        PathBuf::from(name)
    } else {
        candidate
    }
}

/// Write a one-entry zip archive holding `source` under its file name.
fn write_zip(source: &Path, archive: &Path, source_size: u64) -> Result<()> {
    let entry_name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| SenderError::archive(source, "path has no file name"))?;

    let mut input = File::open(source).map_err(|e| SenderError::io(source, e))?;
    let output = File::create(archive).map_err(|e| SenderError::io(archive, e))?;

    // Fixed timestamp so the same input always yields the same bytes.
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL))
        .last_modified_time(DateTime::default())
        .large_file(source_size >= u64::from(u32::MAX));

    let mut writer = ZipWriter::new(BufWriter::new(output));
    writer
        .start_file(entry_name, options)
        .map_err(|e| SenderError::archive(archive, e))?;
    std::io::copy(&mut input, &mut writer).map_err(|e| SenderError::io(archive, e))?;

    let mut out = writer
        .finish()
        .map_err(|e| SenderError::archive(archive, e))?;
    out.flush().map_err(|e| SenderError::io(archive, e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    /// Deterministic, effectively incompressible bytes (xorshift64).
    fn noise(len: usize, mut seed: u64) -> Vec<u8> {
        let mut out = Vec::with_capacity(len);
        while out.len() < len {
            seed ^= seed << 13;
            seed ^= seed >> 7;
            seed ^= seed << 17;
            out.extend_from_slice(&seed.to_le_bytes());
        }
        out.truncate(len);
        out
    }

    fn unzip_single(archive: &Path) -> (String, Vec<u8>) {
        let mut zip = zip::ZipArchive::new(File::open(archive).unwrap()).unwrap();
        assert_eq!(zip.len(), 1);
        let mut entry = zip.by_index(0).unwrap();
        let name = entry.name().to_string();
        let mut data = Vec::new();
        entry.read_to_end(&mut data).unwrap();
        (name, data)
    }

    #[test]
    fn test_archive_path_for() {
        assert_eq!(
            archive_path_for(Path::new("/tmp/report.txt")),
            PathBuf::from("/tmp/report.zip")
        );
        assert_eq!(
            archive_path_for(Path::new("/tmp/data")),
            PathBuf::from("/tmp/data.zip")
        );
        assert_eq!(
            archive_path_for(Path::new("/tmp/bundle.zip")),
            PathBuf::from("/tmp/bundle.zip.zip")
        );
    }

    #[test]
    fn test_disabled_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("report.txt");
        std::fs::write(&src, b"hello").unwrap();

        let artifact = Compressor::new().compress(&src, false).unwrap();
        assert_eq!(artifact, CompressedArtifact::Uncompressed(src.clone()));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_small_file_single_archive() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("report.txt");
        let content = b"quarterly numbers\n".repeat(500);
        std::fs::write(&src, &content).unwrap();

        let artifact = Compressor::new().compress(&src, true).unwrap();
        let archive = tmp.path().join("report.zip");
        assert_eq!(artifact, CompressedArtifact::Single(archive.clone()));

        let (name, data) = unzip_single(&archive);
        assert_eq!(name, "report.txt");
        assert_eq!(data, content);
        assert!(src.exists(), "source must be kept");
    }

    #[test]
    fn test_compression_is_deterministic() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a.log");
        std::fs::write(&src, b"line\n".repeat(1000)).unwrap();

        let compressor = Compressor::new();
        compressor.compress(&src, true).unwrap();
        let first = std::fs::read(tmp.path().join("a.zip")).unwrap();
        compressor.compress(&src, true).unwrap();
        let second = std::fs::read(tmp.path().join("a.zip")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_large_archive_is_split() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("blob.bin");
        let content = noise(50_000, 0x9E37_79B9_7F4A_7C15);
        std::fs::write(&src, &content).unwrap();

        let compressor = Compressor::with_threshold(12_000);
        let artifact = compressor.compress(&src, true).unwrap();
        let CompressedArtifact::Split { archive, parts } = artifact else {
            panic!("expected a split archive");
        };

        assert!(parts.len() > 1);
        assert!(!archive.exists(), "unsplit archive is replaced by its parts");
        for part in &parts {
            let len = std::fs::metadata(part).unwrap().len();
            assert!(len <= 12_000, "{} is {len} bytes", part.display());
        }

        let mut sorted = parts.clone();
        sorted.sort();
        assert_eq!(sorted, parts);

        let rebuilt = tmp.path().join("rebuilt.zip");
        split::join_parts(&parts, &rebuilt).unwrap();
        let (name, data) = unzip_single(&rebuilt);
        assert_eq!(name, "blob.bin");
        assert_eq!(data, content);
    }

    #[test]
    fn test_missing_source() {
        let tmp = tempfile::tempdir().unwrap();
        let err = Compressor::new()
            .compress(&tmp.path().join("nope.txt"), true)
            .unwrap_err();
        assert!(matches!(err, SenderError::FileNotFound(_)));
    }

    #[test]
    fn test_archive_exactly_at_threshold_is_single() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("edge.bin");
        std::fs::write(&src, noise(20_000, 0xDEAD_BEEF_CAFE_F00D)).unwrap();
        let archive = tmp.path().join("edge.zip");

        Compressor::new().compress(&src, true).unwrap();
        let exact = std::fs::metadata(&archive).unwrap().len();

        let at_limit = Compressor::with_threshold(exact).compress(&src, true).unwrap();
        assert_eq!(at_limit, CompressedArtifact::Single(archive.clone()));

        let below = Compressor::with_threshold(exact - 1).compress(&src, true).unwrap();
        let CompressedArtifact::Split { parts, .. } = below else {
            panic!("one byte over the limit must split");
        };
        assert_eq!(parts.len(), 2);
        assert_eq!(std::fs::metadata(&parts[1]).unwrap().len(), 1);
    }

    #[test]
    fn test_zero_threshold_clamped() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("tiny.txt");
        std::fs::write(&src, b"x").unwrap();

        let artifact = Compressor::with_threshold(0).compress(&src, true).unwrap();
        let CompressedArtifact::Split { parts, .. } = artifact else {
            panic!("expected one-byte parts");
        };
        assert!(parts
            .iter()
            .all(|p| std::fs::metadata(p).unwrap().len() == 1));
    }
}
