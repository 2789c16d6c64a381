//! Error types for the sync engine

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a sync run
///
/// Provider failures are deliberately absent: they are recovered inside the
/// merge engine and never surface here.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("No target locales given; pass --locales=<csv>")]
    NoTargetLocales,

    #[error("No '{source_locale}' message files found under {}", root.display())]
    NoSourceFiles { root: PathBuf, source_locale: String },

    #[error("Invalid locale '{locale}': {reason}")]
    InvalidLocale { locale: String, reason: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Malformed translation cache {}: {source}", path.display())]
    CacheParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize content: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SyncError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SyncError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SyncError::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for sync operations
pub type SyncResult<T> = Result<T, SyncError>;
