//! Mock Machine Translator for testing
//!
//! A deterministic, API-free translator that also records what it was asked
//! to translate, so callers can assert how often the provider was reached.
//!
//! # Example
//!
//! ```ignore
//! use locale_sync_mt::{MachineTranslator, MockTranslator, MockMode};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate("hello", "en", "fr").await.unwrap();
//!     assert_eq!(result, "hello_fr");
//!     assert_eq!(mock.call_count(), 1);
//! }
//! ```

use crate::error::{MtError, MtResult};
use crate::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "hello" → "hello_fr"
    Suffix,

    /// Use predefined mappings: (text, target_locale) → translation,
    /// falling back to suffix mode for unknown pairs
    Mappings(HashMap<(String, String), String>),

    /// Simulate API errors on every call
    Error(String),

    /// Return an empty list regardless of input
    Empty,

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
///
/// Clones share their call log, so a clone handed to the engine can be
/// inspected through the original.
#[derive(Debug, Clone)]
pub struct MockTranslator {
    mode: MockMode,
    calls: Arc<AtomicUsize>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl MockTranslator {
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            calls: Arc::new(AtomicUsize::new(0)),
            requested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of `translate_batch` calls that reached this mock
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every text passed to the mock, in call order
    pub fn requested_texts(&self) -> Vec<String> {
        self.requested
            .lock()
            .map(|texts| texts.clone())
            .unwrap_or_default()
    }

    fn apply_translation(&self, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(MtError::TranslationError(msg.clone())),
            MockMode::Empty | MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        _source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requested) = self.requested.lock() {
            requested.extend(texts.iter().cloned());
        }

        if let MockMode::Empty = self.mode {
            return Ok(Vec::new());
        }

        texts
            .iter()
            .map(|text| self.apply_translation(text, target_locale))
            .collect()
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_suffix_single_translation() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let result = mock.translate("hello", "en", "fr").await.unwrap();
        assert_eq!(result, "hello_fr");
    }

    #[tokio::test]
    async fn test_suffix_batch_preserves_order() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let texts = vec![
            "first".to_string(),
            "second".to_string(),
            "third".to_string(),
        ];
        let results = mock.translate_batch(&texts, "en", "fr").await.unwrap();
        assert_eq!(results, vec!["first_fr", "second_fr", "third_fr"]);
    }

    #[tokio::test]
    async fn test_mapping_with_fallback() {
        let mut map = HashMap::new();
        map.insert(
            ("hello".to_string(), "fr".to_string()),
            "bonjour".to_string(),
        );
        let mock = MockTranslator::new(MockMode::Mappings(map));
        assert_eq!(mock.translate("hello", "en", "fr").await.unwrap(), "bonjour");
        assert_eq!(mock.translate("other", "en", "fr").await.unwrap(), "other_fr");
    }

    #[tokio::test]
    async fn test_error_mode_returns_error() {
        let mock = MockTranslator::new(MockMode::Error("API unavailable".to_string()));
        match mock.translate("hello", "en", "fr").await {
            Err(MtError::TranslationError(msg)) => assert_eq!(msg, "API unavailable"),
            other => panic!("Expected TranslationError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_mode_returns_nothing() {
        let mock = MockTranslator::new(MockMode::Empty);
        let results = mock
            .translate_batch(&["hello".to_string()], "en", "fr")
            .await
            .unwrap();
        assert!(results.is_empty());
        assert_eq!(mock.translate("hello", "en", "fr").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_records_calls_across_clones() {
        let mock = MockTranslator::new(MockMode::NoOp);
        let clone = mock.clone();
        clone.translate("a", "en", "fr").await.unwrap();
        clone
            .translate_batch(&["b".to_string(), "c".to_string()], "en", "fr")
            .await
            .unwrap();
        assert_eq!(mock.call_count(), 2);
        assert_eq!(mock.requested_texts(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_empty_input_is_not_a_call() {
        let mock = MockTranslator::new(MockMode::Suffix);
        let results = mock.translate_batch(&[], "en", "fr").await.unwrap();
        assert!(results.is_empty());
        assert_eq!(mock.call_count(), 0);
    }
}
