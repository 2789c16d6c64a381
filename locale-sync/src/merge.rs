//! Structure-preserving merge of a source tree into a target locale
//!
//! The source tree decides the shape of the output: every mapping has
//! exactly the source keys and every sequence exactly the source length.
//! The existing target tree only offers values to reuse. For each string
//! leaf the engine tries, in order:
//!
//! 1. preserved keys (e.g. `tone`): copy, never translate
//! 2. the translation cache
//! 3. a non-blank existing target value, which is then cached
//! 4. a dry-run placeholder `[locale] text`, or the provider
//!
//! Provider errors are not fatal. The leaf falls back to its source text,
//! the fallback is cached so the string is not retried this run, and one
//! warning is logged per locale.

use std::collections::BTreeSet;

use indexmap::IndexMap;
use locale_sync_mt::MachineTranslator;
use tracing::{debug, warn};

use crate::cache::{TranslationCache, cache_key};
use crate::content::ContentNode;
use crate::stats::LocaleStats;

/// Keys whose string values are metadata, not copy
pub const DEFAULT_PRESERVED_KEYS: &[&str] = &["tone"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOptions {
    pub source_locale: String,
    pub dry_run: bool,
    pub preserved_keys: BTreeSet<String>,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            source_locale: "en".to_string(),
            dry_run: false,
            preserved_keys: DEFAULT_PRESERVED_KEYS
                .iter()
                .map(|key| key.to_string())
                .collect(),
        }
    }
}

/// Merges source trees into one target locale. Create one per locale.
pub struct MergeEngine<'a> {
    locale: &'a str,
    options: &'a MergeOptions,
    cache: &'a mut TranslationCache,
    provider: &'a dyn MachineTranslator,
    stats: LocaleStats,
    path: Vec<String>,
}

impl<'a> MergeEngine<'a> {
    pub fn new(
        locale: &'a str,
        options: &'a MergeOptions,
        cache: &'a mut TranslationCache,
        provider: &'a dyn MachineTranslator,
    ) -> Self {
        Self {
            locale,
            options,
            cache,
            provider,
            stats: LocaleStats::default(),
            path: Vec::new(),
        }
    }

    pub fn into_stats(self) -> LocaleStats {
        self.stats
    }

    /// Merge `source` against the optional existing `target` tree.
    pub async fn merge(&mut self, source: &ContentNode, target: Option<&ContentNode>) -> ContentNode {
        self.path.clear();
        self.merge_node(source, target).await
    }

    async fn merge_node(&mut self, source: &ContentNode, target: Option<&ContentNode>) -> ContentNode {
        match source {
            ContentNode::Text(text) => self.merge_leaf(text, target).await,
            ContentNode::Sequence(items) => {
                let existing = target.and_then(ContentNode::as_sequence);
                if let Some(existing) = existing.filter(|e| e.len() > items.len()) {
                    debug!(
                        locale = self.locale,
                        path = %self.dotted_path(),
                        dropped = existing.len() - items.len(),
                        "Target list longer than source; extra items dropped"
                    );
                }

                let mut merged = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    self.path.push(index.to_string());
                    let prior = existing.and_then(|e| e.get(index));
                    merged.push(Box::pin(self.merge_node(item, prior)).await);
                    self.path.pop();
                }
                ContentNode::Sequence(merged)
            }
            ContentNode::Mapping(entries) => {
                let existing = target.and_then(ContentNode::as_mapping);
                if let Some(existing) = existing {
                    let extra: Vec<&String> = existing
                        .keys()
                        .filter(|key| !entries.contains_key(*key))
                        .collect();
                    if !extra.is_empty() {
                        debug!(
                            locale = self.locale,
                            path = %self.dotted_path(),
                            keys = ?extra,
                            "Target keys missing from source; dropped"
                        );
                    }
                }

                let mut merged = IndexMap::with_capacity(entries.len());
                for (key, value) in entries {
                    self.path.push(key.clone());
                    let prior = existing.and_then(|e| e.get(key));
                    let merged_value = Box::pin(self.merge_node(value, prior)).await;
                    merged.insert(key.clone(), merged_value);
                    self.path.pop();
                }
                ContentNode::Mapping(merged)
            }
            ContentNode::Null | ContentNode::Bool(_) | ContentNode::Number(_) => source.clone(),
        }
    }

    async fn merge_leaf(&mut self, text: &str, target: Option<&ContentNode>) -> ContentNode {
        self.stats.processed += 1;

        if self.is_preserved_leaf() {
            let kept = target.and_then(ContentNode::as_text).unwrap_or(text);
            return ContentNode::text(kept);
        }

        let hash = cache_key(self.locale, text);
        if let Some(cached) = self.cache.get(self.locale, &hash) {
            self.stats.from_cache += 1;
            return ContentNode::text(cached);
        }

        if let Some(existing) = target
            .filter(|t| t.is_usable_translation())
            .and_then(ContentNode::as_text)
        {
            self.cache.set(self.locale, &hash, existing);
            self.stats.reused_existing += 1;
            return ContentNode::text(existing);
        }

        let value = if self.options.dry_run {
            self.stats.translated += 1;
            format!("[{}] {}", self.locale, text)
        } else {
            self.translate_leaf(text).await
        };

        self.cache.set(self.locale, &hash, &value);
        ContentNode::Text(value)
    }

    /// Ask the provider for one string; fall back to the source on any failure.
    async fn translate_leaf(&mut self, text: &str) -> String {
        let request = [text.to_string()];
        match self
            .provider
            .translate_batch(&request, &self.options.source_locale, self.locale)
            .await
        {
            Ok(results) => {
                self.stats.translated += 1;
                match results.into_iter().next() {
                    Some(translated) if !translated.trim().is_empty() => translated,
                    _ => {
                        debug!(
                            locale = self.locale,
                            path = %self.dotted_path(),
                            "Provider returned nothing usable; keeping source text"
                        );
                        text.to_string()
                    }
                }
            }
            Err(e) => {
                self.stats.failed += 1;
                if self.stats.provider_warnings == 0 {
                    self.stats.provider_warnings += 1;
                    warn!(
                        locale = self.locale,
                        provider = self.provider.provider_name(),
                        error = %e,
                        "Translation failed; using source text for this locale's failing strings"
                    );
                } else {
                    debug!(
                        locale = self.locale,
                        path = %self.dotted_path(),
                        error = %e,
                        "Translation failed"
                    );
                }
                text.to_string()
            }
        }
    }

    fn is_preserved_leaf(&self) -> bool {
        self.path
            .last()
            .is_some_and(|key| self.options.preserved_keys.contains(key))
    }

    fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}
