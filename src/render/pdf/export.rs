//! Atomic file export.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::Result;

/// File name used when the caller gives a directory or nothing at all.
pub const DEFAULT_PDF_FILE_NAME: &str = "summary-report.pdf";

/// Write bytes to `path` so that readers see either the old file or the
/// complete new one, never a partial write.
///
/// The bytes go to a temporary file in the same directory, are synced to
/// disk, and the temporary file is then renamed over the target. If `path`
/// is an existing directory, [`DEFAULT_PDF_FILE_NAME`] is used inside it.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let target = if path.is_dir() {
        path.join(DEFAULT_PDF_FILE_NAME)
    } else {
        path.to_path_buf()
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(&target)?;

    log::debug!("exported {} bytes to {}", bytes.len(), target.display());
    Ok(())
}
