//! Crash-safe file writes

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::{SyncError, SyncResult};

/// Write `contents` to `path` through a temp file in the same directory,
/// then rename over the destination. Parent directories are created.
pub fn write_atomic(path: &Path, contents: &[u8]) -> SyncResult<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(|e| SyncError::io(parent, e))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| SyncError::io(parent, e))?;
    temp.write_all(contents)
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| SyncError::io(temp.path(), e))?;
    temp.persist(path).map_err(|e| SyncError::io(path, e.error))?;
    Ok(())
}
