//! Run configuration

use std::collections::BTreeSet;
use std::path::PathBuf;

use locale_sync_mt::validate_locale;
use tracing::warn;

use crate::error::{SyncError, SyncResult};
use crate::merge::{DEFAULT_PRESERVED_KEYS, MergeOptions};

pub const DEFAULT_SOURCE_LOCALE: &str = "en";
pub const DEFAULT_MESSAGES_ROOT: &str = "messages";
pub const DEFAULT_CACHE_PATH: &str = ".translation-cache.json";
pub const DEFAULT_PROVIDER: &str = "passthrough";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncConfig {
    /// Target locales to generate or update, in run order
    pub locales: Vec<String>,
    pub source_locale: String,
    pub messages_root: PathBuf,
    pub provider: String,
    pub cache_path: PathBuf,
    pub dry_run: bool,
    /// Keys whose string values are copied, never translated
    pub preserved_keys: BTreeSet<String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            locales: Vec::new(),
            source_locale: DEFAULT_SOURCE_LOCALE.to_string(),
            messages_root: PathBuf::from(DEFAULT_MESSAGES_ROOT),
            provider: DEFAULT_PROVIDER.to_string(),
            cache_path: PathBuf::from(DEFAULT_CACHE_PATH),
            dry_run: false,
            preserved_keys: DEFAULT_PRESERVED_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect(),
        }
    }
}

impl SyncConfig {
    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Target locales after trimming, de-duplication and validation.
    ///
    /// Locales are compared case-insensitively, since their names become file
    /// names. The source locale is dropped with a warning. An empty result is
    /// a configuration error.
    pub fn target_locales(&self) -> SyncResult<Vec<String>> {
        check_locale(&self.source_locale)?;

        let mut seen = BTreeSet::new();
        let mut locales = Vec::new();
        for locale in self.locales.iter().map(|l| l.trim()).filter(|l| !l.is_empty()) {
            check_locale(locale)?;
            if locale.eq_ignore_ascii_case(&self.source_locale) {
                warn!(locale, "Skipping target locale equal to the source locale");
                continue;
            }
            if seen.insert(locale.to_ascii_lowercase()) {
                locales.push(locale.to_string());
            }
        }

        if locales.is_empty() {
            return Err(SyncError::NoTargetLocales);
        }
        Ok(locales)
    }

    pub fn merge_options(&self) -> MergeOptions {
        MergeOptions {
            source_locale: self.source_locale.clone(),
            dry_run: self.dry_run,
            preserved_keys: self.preserved_keys.clone(),
        }
    }
}

fn check_locale(locale: &str) -> SyncResult<()> {
    validate_locale(locale).map_err(|e| SyncError::InvalidLocale {
        locale: locale.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SyncConfig::default();
        assert_eq!(config.source_locale, "en");
        assert_eq!(config.provider, "passthrough");
        assert!(config.preserved_keys.contains("tone"));
        assert!(!config.dry_run);
    }

    #[test]
    fn test_target_locales_normalized() {
        let config = SyncConfig::default().with_locales([" fr", "de", "", "fr", "en", "pt-br"]);
        assert_eq!(config.target_locales().unwrap(), vec!["fr", "de", "pt-br"]);
    }

    #[test]
    fn test_source_locale_dropped_in_any_case() {
        let config = SyncConfig::default().with_locales(["EN", "fr", "En"]);
        assert_eq!(config.target_locales().unwrap(), vec!["fr"]);

        let mut config = SyncConfig::default().with_locales(["pt-br", "de"]);
        config.source_locale = "pt-BR".to_string();
        assert_eq!(config.target_locales().unwrap(), vec!["de"]);

        let config = SyncConfig::default().with_locales(["fr", "FR", "pt-BR", "pt-br"]);
        assert_eq!(config.target_locales().unwrap(), vec!["fr", "pt-BR"]);
    }

    #[test]
    fn test_no_locales_is_error() {
        let config = SyncConfig::default();
        assert!(matches!(config.target_locales(), Err(SyncError::NoTargetLocales)));

        let config = SyncConfig::default().with_locales(["en", " "]);
        assert!(matches!(config.target_locales(), Err(SyncError::NoTargetLocales)));
    }

    #[test]
    fn test_invalid_locale_rejected() {
        let config = SyncConfig::default().with_locales(["../../etc"]);
        assert!(matches!(
            config.target_locales(),
            Err(SyncError::InvalidLocale { .. })
        ));
    }

    #[test]
    fn test_merge_options_follow_config() {
        let mut config = SyncConfig::default();
        config.dry_run = true;
        config.source_locale = "de".to_string();
        config.preserved_keys.insert("icon".to_string());
        let options = config.merge_options();
        assert!(options.dry_run);
        assert_eq!(options.source_locale, "de");
        assert!(options.preserved_keys.contains("icon"));
    }
}
