//! Machine Translation trait and utilities
//!
//! `MachineTranslator` is the seam between the sync engine and whatever
//! backend produces translations (an HTTP API, the passthrough, a mock).

use crate::error::{MtError, MtResult};
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// All methods are async to support I/O-bound operations like network requests.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate a single text string from source to target locale
    ///
    /// # Arguments
    ///
    /// * `text` - Text to translate
    /// * `source_locale` - Locale of `text`, e.g. `en`
    /// * `target_locale` - Requested locale, e.g. `pt-BR`
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The translation, empty if the provider returned nothing
    /// * `Err(MtError)` - Whatever [`translate_batch`](Self::translate_batch) reported
    ///
    /// # Example
    ///
    /// ```ignore
    /// let provider = PassthroughTranslator::new();
    /// assert_eq!(provider.translate("Hello", "en", "fr").await?, "Hello");
    /// ```
    async fn translate(
        &self,
        text: &str,
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<String> {
        let results = self
            .translate_batch(&[text.to_string()], source_locale, target_locale)
            .await?;
        Ok(results.into_iter().next().unwrap_or_default())
    }

    /// Translate multiple strings in one call
    ///
    /// Locale identifiers are passed through as given; providers map them to
    /// their API's spelling without dropping the region or script.
    ///
    /// # Guarantees
    ///
    /// - Output order matches input order
    /// - An empty input returns an empty output without touching the network
    async fn translate_batch(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>>;

    /// Name of this provider, used for logging and selection
    fn provider_name(&self) -> &str;
}

/// Normalize the case and separators of a locale code, keeping every subtag
///
/// Follows BCP 47 conventions: the language is lower-case, a four-letter
/// script is title-case, a two-letter region is upper-case, and subtags are
/// joined with `-`.
///
/// # Arguments
///
/// * `locale` - Locale code as configured, e.g. `pt_br` or `ZH-hant`
///
/// # Returns
///
/// The canonical spelling, e.g. `pt-BR` or `zh-Hant`
///
/// # Example
///
/// ```ignore
/// assert_eq!(canonical_locale("pt_br"), "pt-BR");
/// assert_eq!(canonical_locale("zh-hant-tw"), "zh-Hant-TW");
/// ```
pub fn canonical_locale(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .enumerate()
        .map(|(i, part)| {
            let alphabetic = part.chars().all(|c| c.is_ascii_alphabetic());
            match (i, part.len()) {
                (0, _) => part.to_ascii_lowercase(),
                (_, 4) if alphabetic => {
                    let (first, rest) = part.split_at(1);
                    format!("{}{}", first.to_ascii_uppercase(), rest.to_ascii_lowercase())
                }
                (_, 2) if alphabetic => part.to_ascii_uppercase(),
                _ => part.to_ascii_lowercase(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Validate that a locale code contains only alphanumerics, hyphens and underscores
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}
