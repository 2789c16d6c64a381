//! Discovery of source-locale message files

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{SyncError, SyncResult};
use crate::module::CONTENT_EXTENSIONS;

/// Directory name holding type declarations; never contains content
pub const RESERVED_TYPES_DIR: &str = "types";

/// Find every `<source_locale>.<ext>` file under `root`, sorted.
///
/// Directories named [`RESERVED_TYPES_DIR`] are skipped at any depth.
/// Finding nothing is an error: it means the root or locale is misconfigured.
pub fn discover_source_files(root: &Path, source_locale: &str) -> SyncResult<Vec<PathBuf>> {
    let root = root.canonicalize().map_err(|e| SyncError::io(root, e))?;

    let mut files = Vec::new();
    let walker = WalkDir::new(&root).follow_links(true).into_iter();
    for entry in walker.filter_entry(|entry| {
        entry.depth() == 0
            || !(entry.file_type().is_dir() && entry.file_name() == RESERVED_TYPES_DIR)
    }) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            SyncError::io(path, e.into())
        })?;
        if entry.file_type().is_file() && is_source_file(entry.path(), source_locale) {
            files.push(entry.into_path());
        }
    }

    if files.is_empty() {
        return Err(SyncError::NoSourceFiles {
            root,
            source_locale: source_locale.to_string(),
        });
    }

    files.sort();
    debug!(count = files.len(), "Discovered source files");
    Ok(files)
}

fn is_source_file(path: &Path, source_locale: &str) -> bool {
    let stem = path.file_stem().and_then(|s| s.to_str());
    let ext = path.extension().and_then(|s| s.to_str());
    match (stem, ext) {
        (Some(stem), Some(ext)) => stem == source_locale && CONTENT_EXTENSIONS.contains(&ext),
        _ => false,
    }
}

/// Sibling path for `locale` with the same extension as `source_path`.
pub fn target_path_for(source_path: &Path, locale: &str) -> PathBuf {
    match source_path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => source_path.with_file_name(format!("{}.{}", locale, ext)),
        None => source_path.with_file_name(locale),
    }
}
