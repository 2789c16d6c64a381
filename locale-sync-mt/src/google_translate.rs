//! Google Translate API provider for machine translation
//!
//! Integrates with Google Translate API v2. The v2 endpoint returns
//! HTML-escaped text even in `text` format, so every result is passed
//! through [`decode_html_entities`] before it leaves the provider.
//!
//! Locale codes are sent with their region or script intact (`pt-BR`,
//! `zh-TW`); Chinese script subtags are spelled the way v2 expects them
//! (`zh-Hans` → `zh-CN`, `zh-Hant` → `zh-TW`).
//!
//! # Authentication
//!
//! The provider loads the API key from the `GOOGLE_TRANSLATE_API_KEY`
//! environment variable.
//!
//! # Example
//!
//! ```ignore
//! use locale_sync_mt::{GoogleTranslateProvider, MachineTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::from_env()?;
//!     let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
//!     let results = provider.translate_batch(&texts, "en", "pt-BR").await?;
//!     println!("{:?}", results);
//!     Ok(())
//! }
//! ```

use crate::entities::decode_html_entities;
use crate::error::{MtError, MtResult};
use crate::translator::{MachineTranslator, canonical_locale, validate_locale};
use async_trait::async_trait;
use serde_json::json;

pub const GOOGLE_API_KEY_VAR: &str = "GOOGLE_TRANSLATE_API_KEY";

const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Canonical codes that v2 spells differently
const LOCALE_OVERRIDES: &[(&str, &str)] = &[("zh-Hans", "zh-CN"), ("zh-Hant", "zh-TW")];

/// Google Translate API v2 provider
///
/// Splits large batches into API-sized requests and decodes the HTML
/// entities v2 leaves in its output.
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    api_key: String,
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Google Translate v2 API accepts up to 128 texts per request
    const MAX_BATCH_SIZE: usize = 128;

    /// Maximum characters per string (30KB per Google Translate API limits)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Create a new provider with an explicit API key
    ///
    /// # Arguments
    ///
    /// * `api_key` - Google Translate API key
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If the key is blank or the HTTP client cannot be built
    pub fn new(api_key: String) -> MtResult<Self> {
        if api_key.trim().is_empty() {
            return Err(MtError::ConfigError("API key cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Create a provider from the `GOOGLE_TRANSLATE_API_KEY` environment variable
    pub fn from_env() -> MtResult<Self> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Create a provider reading `GOOGLE_TRANSLATE_API_KEY` through `lookup`
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError::ConfigError)` - If the variable is unset or blank
    pub fn from_lookup<F>(lookup: F) -> MtResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(GOOGLE_API_KEY_VAR).ok_or_else(|| {
            MtError::ConfigError(format!("{} environment variable not set", GOOGLE_API_KEY_VAR))
        })?;

        Self::new(api_key)
    }

    /// Point the provider at a different endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn chunk_batch(texts: &[String]) -> Vec<&[String]> {
        texts.chunks(Self::MAX_BATCH_SIZE).collect()
    }

    /// Translate one chunk (≤ MAX_BATCH_SIZE texts) via the API
    async fn translate_chunk(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        let url = format!("{}?key={}", self.base_url, self.api_key);
        let body = request_body(texts, source_locale, target_locale);

        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(MtError::from_response(response).await);
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        parse_translations(&json)
    }
}

/// Locale code as v2 expects it: canonical casing, region kept.
fn api_locale(locale: &str) -> String {
    let canonical = canonical_locale(locale);
    LOCALE_OVERRIDES
        .iter()
        .find(|(from, _)| *from == canonical)
        .map_or(canonical, |(_, to)| to.to_string())
}

fn request_body(texts: &[String], source: &str, target: &str) -> serde_json::Value {
    json!({
        "q": texts,
        "source": api_locale(source),
        "target": api_locale(target),
        "format": "text"
    })
}

/// Pull `data.translations[*].translatedText` out of a v2 response, decoded.
fn parse_translations(json: &serde_json::Value) -> MtResult<Vec<String>> {
    let translations = json["data"]["translations"].as_array().ok_or_else(|| {
        MtError::TranslationError(
            "Invalid API response: missing 'data.translations' array".to_string(),
        )
    })?;

    translations
        .iter()
        .map(|t| {
            t["translatedText"]
                .as_str()
                .map(decode_html_entities)
                .ok_or_else(|| {
                    MtError::TranslationError(
                        "Invalid API response: missing 'translatedText' field".to_string(),
                    )
                })
        })
        .collect()
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("api_key", &"***")
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    /// Translate a batch, one request per 128 texts
    ///
    /// # Arguments
    ///
    /// * `texts` - Strings to translate; an empty slice makes no request
    /// * `source_locale` - Locale of `texts`, e.g. `en`
    /// * `target_locale` - Requested locale, e.g. `pt-BR`
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Decoded translations in input order
    /// * `Err(MtError)` - Invalid locale, oversized text, HTTP or response error
    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        for (i, text) in texts.iter().enumerate() {
            if text.len() > Self::MAX_CHARS_PER_STRING {
                return Err(MtError::TranslationError(format!(
                    "Text at index {} exceeds maximum length of {} characters",
                    i,
                    Self::MAX_CHARS_PER_STRING
                )));
            }
        }

        let mut all_results = Vec::with_capacity(texts.len());
        for chunk in Self::chunk_batch(texts) {
            let chunk_results = self
                .translate_chunk(chunk, source_locale, target_locale)
                .await?;
            all_results.extend(chunk_results);
        }

        if all_results.len() != texts.len() {
            return Err(MtError::TranslationError(format!(
                "Expected {} translations, got {}",
                texts.len(),
                all_results.len()
            )));
        }

        Ok(all_results)
    }

    fn provider_name(&self) -> &str {
        "google"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_with_valid_key() {
        let provider = GoogleTranslateProvider::new("test-api-key".to_string()).unwrap();
        assert_eq!(provider.provider_name(), "google");
    }

    #[test]
    fn test_new_with_empty_key() {
        match GoogleTranslateProvider::new("   ".to_string()) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains("empty")),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_chunk_over_limit() {
        let texts = (0..200).map(|i| format!("text{}", i)).collect::<Vec<_>>();
        let chunks = GoogleTranslateProvider::chunk_batch(&texts);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 128);
        assert_eq!(chunks[1].len(), 72);
    }

    #[test]
    fn test_chunk_empty() {
        let texts: Vec<String> = vec![];
        assert!(GoogleTranslateProvider::chunk_batch(&texts).is_empty());
    }

    #[tokio::test]
    async fn test_batch_empty_skips_network() {
        // Unroutable base URL: any request would fail.
        let provider = GoogleTranslateProvider::new("test-key".to_string())
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let results = provider.translate_batch(&[], "en", "fr").await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_target_locale() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let result = provider
            .translate_batch(&["hello".to_string()], "en", "invalid#code")
            .await;
        assert!(matches!(result, Err(MtError::InvalidLocale(_))));
    }

    #[tokio::test]
    async fn test_text_too_long() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let long_text = "x".repeat(GoogleTranslateProvider::MAX_CHARS_PER_STRING + 1);
        match provider.translate_batch(&[long_text], "en", "fr").await {
            Err(MtError::TranslationError(msg)) => assert!(msg.contains("exceeds maximum")),
            other => panic!("Expected TranslationError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_translations_decodes_entities() {
        let json = json!({
            "data": {
                "translations": [
                    { "translatedText": "l&#39;homme &amp; la &quot;femme&quot;" },
                    { "translatedText": "a&#x2F;b &lt;i&gt;" }
                ]
            }
        });
        let results = parse_translations(&json).unwrap();
        assert_eq!(results, vec!["l'homme & la \"femme\"", "a/b <i>"]);
    }

    #[test]
    fn test_request_keeps_region_and_script() {
        let texts = vec!["Hello".to_string()];
        for (target, expected) in [
            ("pt-br", "pt-BR"),
            ("pt-PT", "pt-PT"),
            ("zh-TW", "zh-TW"),
            ("zh_hant", "zh-TW"),
            ("zh-Hans", "zh-CN"),
            ("fr", "fr"),
        ] {
            let body = request_body(&texts, "en", target);
            assert_eq!(body["target"], expected, "target {}", target);
        }
        assert_eq!(request_body(&texts, "en-GB", "fr")["source"], "en-GB");
    }

    #[test]
    fn test_from_lookup() {
        let provider = GoogleTranslateProvider::from_lookup(|var| {
            (var == GOOGLE_API_KEY_VAR).then(|| "test-key".to_string())
        });
        assert!(provider.is_ok());

        match GoogleTranslateProvider::from_lookup(|_| None) {
            Err(MtError::ConfigError(msg)) => assert!(msg.contains(GOOGLE_API_KEY_VAR)),
            other => panic!("Expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_translations_missing_array() {
        let json = json!({ "error": "nope" });
        assert!(parse_translations(&json).is_err());
    }

    #[test]
    fn test_debug_output_masks_key() {
        let provider = GoogleTranslateProvider::new("test-key".to_string()).unwrap();
        let debug_str = format!("{:?}", provider);
        assert!(debug_str.contains("***"));
        assert!(!debug_str.contains("test-key"));
    }

    #[tokio::test]
    #[ignore] // Run with: cargo test --ignored
    async fn test_real_api_batch_translation() {
        if std::env::var(GOOGLE_API_KEY_VAR).is_err() {
            eprintln!("Skipping: {} not set", GOOGLE_API_KEY_VAR);
            return;
        }

        let provider = GoogleTranslateProvider::from_env().unwrap();
        let texts = vec!["Hello".to_string(), "Don't stop".to_string()];
        let results = provider.translate_batch(&texts, "en", "fr").await.unwrap();

        assert_eq!(results.len(), 2);
        for output in &results {
            assert!(!output.contains("&#39;"));
        }
    }
}
