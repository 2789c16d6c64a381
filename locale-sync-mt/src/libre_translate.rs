//! LibreTranslate provider
//!
//! Talks to a self-hosted or commercial LibreTranslate server. Needs the
//! server URL (`LIBRETRANSLATE_URL`); the API key (`LIBRETRANSLATE_API_KEY`)
//! is sent when present since public instances require one.
//!
//! The `/translate` endpoint accepts an array for `q` and answers with an
//! array of the same length in `translatedText`.
//!
//! Locale codes keep their region or script (`pt-BR`, `zh-Hant`); Chinese
//! region codes are mapped to the script codes LibreTranslate lists
//! (`zh-TW` → `zh-Hant`, `zh-CN` → `zh-Hans`).

use crate::error::{MtError, MtResult};
use crate::translator::{MachineTranslator, canonical_locale, validate_locale};
use async_trait::async_trait;
use serde_json::json;

pub const LIBRETRANSLATE_URL_VAR: &str = "LIBRETRANSLATE_URL";
pub const LIBRETRANSLATE_API_KEY_VAR: &str = "LIBRETRANSLATE_API_KEY";

/// Canonical codes that LibreTranslate spells differently
const LOCALE_OVERRIDES: &[(&str, &str)] = &[
    ("zh-CN", "zh-Hans"),
    ("zh-SG", "zh-Hans"),
    ("zh-TW", "zh-Hant"),
    ("zh-HK", "zh-Hant"),
];

/// LibreTranslate provider
#[derive(Clone)]
pub struct LibreTranslateProvider {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl LibreTranslateProvider {
    /// Create a provider for a LibreTranslate server
    ///
    /// # Arguments
    ///
    /// * `endpoint` - Server base URL; a trailing `/` is ignored
    /// * `api_key` - Optional API key; blank keys are treated as absent
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError::ConfigError)` - If the endpoint is empty or not http(s)
    pub fn new(endpoint: String, api_key: Option<String>) -> MtResult<Self> {
        let endpoint = endpoint.trim().trim_end_matches('/').to_string();
        if endpoint.is_empty() {
            return Err(MtError::ConfigError(
                "LibreTranslate endpoint cannot be empty".to_string(),
            ));
        }
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            return Err(MtError::ConfigError(format!(
                "LibreTranslate endpoint must be an http(s) URL: {}",
                endpoint
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            client,
        })
    }

    /// Create a provider reading `LIBRETRANSLATE_URL` and
    /// `LIBRETRANSLATE_API_KEY` through `lookup`
    pub fn from_lookup<F>(lookup: F) -> MtResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = lookup(LIBRETRANSLATE_URL_VAR).ok_or_else(|| {
            MtError::ConfigError(format!(
                "{} environment variable not set",
                LIBRETRANSLATE_URL_VAR
            ))
        })?;

        Self::new(endpoint, lookup(LIBRETRANSLATE_API_KEY_VAR))
    }

    fn request_body(&self, texts: &[String], source: &str, target: &str) -> serde_json::Value {
        let mut body = json!({
            "q": texts,
            "source": api_locale(source),
            "target": api_locale(target),
            "format": "text"
        });
        if let Some(key) = &self.api_key {
            body["api_key"] = json!(key);
        }
        body
    }
}

fn api_locale(locale: &str) -> String {
    let canonical = canonical_locale(locale);
    LOCALE_OVERRIDES
        .iter()
        .find(|(from, _)| *from == canonical)
        .map_or(canonical, |(_, to)| to.to_string())
}

/// Accept both the array form (`q` was an array) and the scalar form.
fn parse_translations(json: &serde_json::Value) -> MtResult<Vec<String>> {
    match &json["translatedText"] {
        serde_json::Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    MtError::TranslationError(
                        "Invalid API response: non-string entry in 'translatedText'".to_string(),
                    )
                })
            })
            .collect(),
        serde_json::Value::String(text) => Ok(vec![text.clone()]),
        _ => Err(MtError::TranslationError(
            "Invalid API response: missing 'translatedText'".to_string(),
        )),
    }
}

impl std::fmt::Debug for LibreTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibreTranslateProvider")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for LibreTranslateProvider {
    /// Translate a batch in a single `/translate` request
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Translations in input order
    /// * `Err(MtError)` - Invalid locale, HTTP error, or a malformed or short response
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

        let url = format!("{}/translate", self.endpoint);
        let body = self.request_body(texts, source_locale, target_locale);
        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            return Err(MtError::from_response(response).await);
        }

        let json: serde_json::Value = response.json().await.map_err(|e| {
            MtError::TranslationError(format!("Failed to parse API response: {}", e))
        })?;

        let results = parse_translations(&json)?;
        if results.len() != texts.len() {
            return Err(MtError::TranslationError(format!(
                "Expected {} translations, got {}",
                texts.len(),
                results.len()
            )));
        }
        Ok(results)
    }

    fn provider_name(&self) -> &str {
        "libretranslate"
    }
}
