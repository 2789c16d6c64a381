//! Provider selection by name
//!
//! Missing credentials and unknown names are soft failures: a warning is
//! logged and the passthrough provider is used so the run can continue.

use crate::error::MtResult;
use crate::google_translate::GoogleTranslateProvider;
use crate::libre_translate::LibreTranslateProvider;
use crate::passthrough::PassthroughTranslator;
use crate::translator::MachineTranslator;
use tracing::warn;

/// Names accepted by [`create_provider`]
pub const PROVIDER_NAMES: &[&str] = &["passthrough", "google", "libretranslate"];

/// Build the provider registered under `name`, reading credentials from the
/// process environment.
///
/// # Arguments
///
/// * `name` - One of [`PROVIDER_NAMES`] (case-insensitive) or an alias
///
/// # Returns
///
/// The requested provider, or [`PassthroughTranslator`] with a logged
/// warning when the name is unknown or its configuration is missing.
pub fn create_provider(name: &str) -> Box<dyn MachineTranslator> {
    create_provider_with(name, |var| std::env::var(var).ok())
}

/// Same as [`create_provider`] with an explicit variable lookup.
pub fn create_provider_with<F>(name: &str, lookup: F) -> Box<dyn MachineTranslator>
where
    F: Fn(&str) -> Option<String>,
{
    let built: MtResult<Box<dyn MachineTranslator>> = match name.trim().to_lowercase().as_str() {
        "passthrough" | "none" | "noop" => return Box::new(PassthroughTranslator::new()),
        "google" => GoogleTranslateProvider::from_lookup(&lookup)
            .map(|p| Box::new(p) as Box<dyn MachineTranslator>),
        "libretranslate" | "libre" => LibreTranslateProvider::from_lookup(&lookup)
            .map(|p| Box::new(p) as Box<dyn MachineTranslator>),
        other => {
            warn!(
                provider = other,
                "Unknown translation provider (expected one of {}); falling back to passthrough",
                PROVIDER_NAMES.join(", ")
            );
            return Box::new(PassthroughTranslator::new());
        }
    };

    built.unwrap_or_else(|e| {
        warn!(provider = name, error = %e, "Provider not configured; falling back to passthrough");
        Box::new(PassthroughTranslator::new())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::google_translate::GOOGLE_API_KEY_VAR;
    use crate::libre_translate::{LIBRETRANSLATE_API_KEY_VAR, LIBRETRANSLATE_URL_VAR};
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_passthrough_by_name_and_alias() {
        assert_eq!(create_provider_with("passthrough", env(&[])).provider_name(), "passthrough");
        assert_eq!(create_provider_with("none", env(&[])).provider_name(), "passthrough");
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let provider = create_provider_with("babelfish", env(&[]));
        assert_eq!(provider.provider_name(), "passthrough");
    }

    #[test]
    fn test_google_without_key_falls_back() {
        let provider = create_provider_with("google", env(&[]));
        assert_eq!(provider.provider_name(), "passthrough");
    }

    #[test]
    fn test_google_with_blank_key_falls_back() {
        let provider = create_provider_with("google", env(&[(GOOGLE_API_KEY_VAR, " ")]));
        assert_eq!(provider.provider_name(), "passthrough");
    }

    #[test]
    fn test_google_with_key() {
        let provider = create_provider_with("Google", env(&[(GOOGLE_API_KEY_VAR, "k")]));
        assert_eq!(provider.provider_name(), "google");
    }

    #[test]
    fn test_libretranslate_needs_endpoint() {
        let provider =
            create_provider_with("libretranslate", env(&[(LIBRETRANSLATE_API_KEY_VAR, "k")]));
        assert_eq!(provider.provider_name(), "passthrough");

        let provider = create_provider_with(
            "libretranslate",
            env(&[(LIBRETRANSLATE_URL_VAR, "https://lt.example.org")]),
        );
        assert_eq!(provider.provider_name(), "libretranslate");
    }
}
