//! Cutting an archive into numbered parts and putting it back together.
//!
//! Parts are named `<archive>.partNNN`, 1-based. The counter is at least
//! three digits wide and grows with the total so that sorting the names
//! lexicographically always gives the numeric order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, SenderError};

/// Path of part `index` (1-based) out of `total` for `archive`.
pub fn part_path(archive: &Path, index: usize, total: usize) -> PathBuf {
    let width = total.to_string().len().max(3);
    let mut name = archive.as_os_str().to_owned();
    name.push(format!(".part{index:0width$}"));
    PathBuf::from(name)
}

/// Split `path` into consecutive parts of at most `max_part_size` bytes.
///
/// Returns the part paths in order. The input file is left in place.
pub fn split_file(path: &Path, max_part_size: u64) -> Result<Vec<PathBuf>> {
    let max_part_size = max_part_size.max(1);
    let size = std::fs::metadata(path)
        .map_err(|e| SenderError::io(path, e))?
        .len();
    let total = size.div_ceil(max_part_size).max(1) as usize;

    let mut reader = BufReader::new(File::open(path).map_err(|e| SenderError::io(path, e))?);
    let mut parts = Vec::with_capacity(total);

    for index in 1..=total {
        let part = part_path(path, index, total);
        let file = File::create(&part).map_err(|e| SenderError::io(&part, e))?;
        let mut out = BufWriter::new(file);
        let written = std::io::copy(&mut (&mut reader).take(max_part_size), &mut out)
            .map_err(|e| SenderError::io(&part, e))?;
        out.flush().map_err(|e| SenderError::io(&part, e))?;

        tracing::debug!(part = %part.display(), bytes = written, "Wrote archive part");
        parts.push(part);
    }

    Ok(parts)
}

/// Concatenate `parts`, in the order given, into `output`.
///
/// Returns the number of bytes written.
pub fn join_parts(parts: &[PathBuf], output: &Path) -> Result<u64> {
    let file = File::create(output).map_err(|e| SenderError::io(output, e))?;
    let mut out = BufWriter::new(file);
    let mut total = 0u64;

    for part in parts {
        let mut input = File::open(part).map_err(|e| SenderError::io(part, e))?;
        total += std::io::copy(&mut input, &mut out).map_err(|e| SenderError::io(output, e))?;
    }
    out.flush().map_err(|e| SenderError::io(output, e))?;

    tracing::info!(
        output = %output.display(),
        parts = parts.len(),
        bytes = total,
        "Joined archive parts"
    );
    Ok(total)
}
