//! Persistent translation cache
//!
//! Maps `locale → hash(locale, source text) → translation`. Loaded once per
//! run, mutated in memory, and written back at most once, only if something
//! actually changed.
//!
//! On disk it is a JSON object:
//!
//! ```json
//! {
//!   "fr": { "9f86d08…": "Bonjour" },
//!   "es": { "2c26b46…": "Hola" }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{SyncError, SyncResult};
use crate::fsio::write_atomic;

type LocaleEntries = BTreeMap<String, String>;

/// Cache key for `text` translated into `locale`: hex SHA-256 of `locale::text`.
pub fn cache_key(locale: &str, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(locale.as_bytes());
    hasher.update(b"::");
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug)]
pub struct TranslationCache {
    path: PathBuf,
    entries: BTreeMap<String, LocaleEntries>,
    dirty: bool,
}

impl TranslationCache {
    /// An empty cache that will be saved to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
            dirty: false,
        }
    }

    /// Load the cache at `path`. A missing file is a first run, not an error;
    /// a malformed one is fatal.
    pub fn load(path: impl Into<PathBuf>) -> SyncResult<Self> {
        let path = path.into();
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No translation cache yet; starting empty");
                return Ok(Self::new(path));
            }
            Err(e) => return Err(SyncError::io(&path, e)),
        };

        let entries: BTreeMap<String, LocaleEntries> =
            serde_json::from_str(&text).map_err(|source| SyncError::CacheParse {
                path: path.clone(),
                source,
            })?;

        debug!(
            path = %path.display(),
            locales = entries.len(),
            "Loaded translation cache"
        );
        Ok(Self {
            path,
            entries,
            dirty: false,
        })
    }

    pub fn get(&self, locale: &str, hash: &str) -> Option<&str> {
        self.entries
            .get(locale)
            .and_then(|entries| entries.get(hash))
            .map(String::as_str)
    }

    /// Insert or overwrite an entry. Returns `true` when the stored value
    /// changed; only then is the cache marked dirty.
    pub fn set(&mut self, locale: &str, hash: &str, value: &str) -> bool {
        let entries = self.entries.entry(locale.to_string()).or_default();
        if entries.get(hash).map(String::as_str) == Some(value) {
            return false;
        }
        entries.insert(hash.to_string(), value.to_string());
        self.dirty = true;
        true
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Total number of cached translations across locales.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write the cache if it changed since load. Returns whether a write happened.
    pub fn save(&mut self) -> SyncResult<bool> {
        if !self.dirty {
            debug!("Translation cache unchanged; not writing");
            return Ok(false);
        }

        let mut text = serde_json::to_string_pretty(&self.entries)?;
        text.push('\n');
        write_atomic(&self.path, text.as_bytes())?;
        self.dirty = false;

        info!(
            path = %self.path.display(),
            entries = self.len(),
            "Saved translation cache"
        );
        Ok(true)
    }
}
