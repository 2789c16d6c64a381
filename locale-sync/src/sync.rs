//! Run coordinator: every target locale × every source file
//!
//! Locales run one after another, and files within a locale run in walker
//! order, so logs and cache contents are reproducible for identical inputs.
//! The cache is flushed once, after all locales, and never in dry-run mode.

use std::fmt;
use std::path::{Path, PathBuf};

use locale_sync_mt::MachineTranslator;
use tracing::info;

use crate::cache::TranslationCache;
use crate::config::SyncConfig;
use crate::error::{SyncError, SyncResult};
use crate::fsio::write_atomic;
use crate::merge::MergeEngine;
use crate::module::{load_message_file, parse_message_file};
use crate::stats::LocaleStats;
use crate::synthesize::synthesize;
use crate::walker::{discover_source_files, target_path_for};

/// What happened (or would happen) to one target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Unchanged,
    Created,
    Updated,
    WouldCreate,
    WouldUpdate,
}

impl FileAction {
    fn decide(existing: Option<&str>, output: &str, dry_run: bool) -> Self {
        match (existing, dry_run) {
            (Some(existing), _) if existing == output => FileAction::Unchanged,
            (Some(_), false) => FileAction::Updated,
            (Some(_), true) => FileAction::WouldUpdate,
            (None, false) => FileAction::Created,
            (None, true) => FileAction::WouldCreate,
        }
    }

    fn writes(self) -> bool {
        matches!(self, FileAction::Created | FileAction::Updated)
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileAction::Unchanged => "unchanged",
            FileAction::Created => "created",
            FileAction::Updated => "updated",
            FileAction::WouldCreate => "would create",
            FileAction::WouldUpdate => "would update",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub action: FileAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleReport {
    pub locale: String,
    pub stats: LocaleStats,
    pub files: Vec<FileReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub locales: Vec<LocaleReport>,
    /// Whether the cache file was rewritten at the end of the run
    pub cache_written: bool,
}

impl SyncReport {
    pub fn locale(&self, locale: &str) -> Option<&LocaleReport> {
        self.locales.iter().find(|report| report.locale == locale)
    }
}

/// Run a full sync with `provider`.
///
/// Configuration problems are reported before any file is touched. Source
/// and target parse errors and write failures abort the run; provider
/// failures never do.
pub async fn run_sync(
    config: &SyncConfig,
    provider: &dyn MachineTranslator,
) -> SyncResult<SyncReport> {
    let locales = config.target_locales()?;
    let sources = discover_source_files(&config.messages_root, &config.source_locale)?;
    let mut cache = TranslationCache::load(&config.cache_path)?;
    let options = config.merge_options();

    info!(
        provider = provider.provider_name(),
        files = sources.len(),
        locales = ?locales,
        dry_run = config.dry_run,
        "Starting translation sync"
    );

    let mut reports = Vec::with_capacity(locales.len());
    for locale in &locales {
        let mut engine = MergeEngine::new(locale, &options, &mut cache, provider);
        let mut files = Vec::with_capacity(sources.len());

        for source_path in &sources {
            let source = load_message_file(source_path)?;
            let target_path = target_path_for(source_path, locale);
            let existing_text = read_optional(&target_path)?;
            let existing = existing_text
                .as_deref()
                .map(|text| parse_message_file(text, source.format))
                .transpose()
                .map_err(|message| SyncError::parse(&target_path, message))?;

            let merged = engine
                .merge(&source.content, existing.as_ref().map(|file| &file.content))
                .await;
            let output = synthesize(&source, &config.source_locale, locale, &merged)?;

            let action = FileAction::decide(existing_text.as_deref(), &output, config.dry_run);
            if action.writes() {
                write_atomic(&target_path, output.as_bytes())?;
            }
            info!(locale = %locale, path = %target_path.display(), "{}", action);
            files.push(FileReport {
                path: target_path,
                action,
            });
        }

        let stats = engine.into_stats();
        info!(locale = %locale, "{}", stats);
        reports.push(LocaleReport {
            locale: locale.clone(),
            stats,
            files,
        });
    }

    let cache_written = if config.dry_run {
        false
    } else {
        cache.save()?
    };

    Ok(SyncReport {
        locales: reports,
        cache_written,
    })
}

fn read_optional(path: &Path) -> SyncResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SyncError::io(path, e)),
    }
}
