//! Exported symbol names for generated locale modules
//!
//! A source module `const HomePageEn = …; export default HomePageEn;` becomes
//! `HomePageZh` for `zh`. The rules below are tried in order and the first
//! match wins. When none matches, the target locale is appended.

/// `pt-br` → `ptBr`, `zh_Hant` → `zhHant`, `en` → `en`
pub fn camel_case_locale(locale: &str) -> String {
    locale_parts(locale)
        .enumerate()
        .map(|(i, part)| {
            if i == 0 {
                part.to_lowercase()
            } else {
                capitalize(part)
            }
        })
        .collect()
}

/// `pt-br` → `PtBr`, `en` → `En`
pub fn pascal_case_locale(locale: &str) -> String {
    locale_parts(locale).map(capitalize).collect()
}

/// `pt-br` → `PT_BR`, `en` → `EN`
pub fn upper_case_locale(locale: &str) -> String {
    locale_parts(locale)
        .map(str::to_uppercase)
        .collect::<Vec<_>>()
        .join("_")
}

/// `pt-BR` → `pt_br`, `en` → `en`
fn lower_case_locale(locale: &str) -> String {
    locale_parts(locale)
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("_")
}

fn locale_parts(locale: &str) -> impl Iterator<Item = &str> {
    locale.split(['-', '_']).filter(|part| !part.is_empty())
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

type SymbolRule = fn(symbol: &str, source_locale: &str, target_locale: &str) -> Option<String>;

/// Ordered rule list; see [`derive_symbol_name`].
const SYMBOL_RULES: &[(&str, SymbolRule)] = &[
    ("symbol is the locale", rule_symbol_is_locale),
    ("upper-case suffix", rule_upper_suffix),
    ("capitalized suffix", rule_capitalized_suffix),
    ("lower-case suffix", rule_lower_suffix),
];

fn rule_symbol_is_locale(symbol: &str, source: &str, target: &str) -> Option<String> {
    let matches = symbol.eq_ignore_ascii_case(source)
        || symbol.eq_ignore_ascii_case(&camel_case_locale(source));
    matches.then(|| camel_case_locale(target))
}

fn replace_suffix(symbol: &str, suffix: &str, replacement: String) -> Option<String> {
    if suffix.is_empty() || !symbol.ends_with(suffix) {
        return None;
    }
    let stem = &symbol[..symbol.len() - suffix.len()];
    Some(format!("{}{}", stem, replacement))
}

fn rule_upper_suffix(symbol: &str, source: &str, target: &str) -> Option<String> {
    replace_suffix(symbol, &upper_case_locale(source), upper_case_locale(target))
}

fn rule_capitalized_suffix(symbol: &str, source: &str, target: &str) -> Option<String> {
    replace_suffix(symbol, &pascal_case_locale(source), pascal_case_locale(target))
}

fn rule_lower_suffix(symbol: &str, source: &str, target: &str) -> Option<String> {
    replace_suffix(symbol, &lower_case_locale(source), camel_case_locale(target))
}

fn append_locale(symbol: &str, target: &str) -> String {
    format!("{}_{}", symbol, camel_case_locale(target))
}

/// Name of the exported constant in the `target_locale` module, given the
/// source module's symbol.
///
/// 1. symbol equals the source locale (any case): camel-cased target locale
/// 2. symbol ends in the upper-case source locale: swap for upper-case target
/// 3. symbol ends in the capitalized source locale: swap for capitalized target
/// 4. symbol ends in the lower-case source locale: swap for camel-cased target
/// 5. otherwise append `_<camel-cased target>`
pub fn derive_symbol_name(symbol: &str, source_locale: &str, target_locale: &str) -> String {
    SYMBOL_RULES
        .iter()
        .find_map(|(_, rule)| rule(symbol, source_locale, target_locale))
        .unwrap_or_else(|| append_locale(symbol, target_locale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::plain("en", "en")]
    #[case::region("pt-br", "ptBr")]
    #[case::region_upper("pt-BR", "ptBr")]
    #[case::script("zh_Hant", "zhHant")]
    #[case::numeric_region("es-419", "es419")]
    fn test_camel_case_locale(#[case] locale: &str, #[case] expected: &str) {
        assert_eq!(camel_case_locale(locale), expected);
    }

    #[test]
    fn test_other_locale_casings() {
        assert_eq!(pascal_case_locale("pt-br"), "PtBr");
        assert_eq!(pascal_case_locale("EN"), "En");
        assert_eq!(upper_case_locale("pt-br"), "PT_BR");
        assert_eq!(lower_case_locale("pt-BR"), "pt_br");
    }

    #[rstest]
    // rule 1: symbol is the locale
    #[case::locale_symbol("en", "en", "zh", "zh")]
    #[case::locale_symbol_any_case("EN", "en", "fr", "fr")]
    #[case::locale_symbol_to_region("en", "en", "pt-br", "ptBr")]
    #[case::camel_locale_symbol("ptBr", "pt-br", "en", "en")]
    // rule 2: upper-case suffix
    #[case::upper_suffix("HomePageEN", "en", "fr", "HomePageFR")]
    #[case::upper_suffix_region("HomePageEN", "en", "pt-br", "HomePagePT_BR")]
    #[case::upper_suffix_from_region("MESSAGES_PT_BR", "pt-br", "de", "MESSAGES_DE")]
    // rule 3: capitalized suffix
    #[case::capitalized_suffix("HomePageEn", "en", "zh", "HomePageZh")]
    #[case::capitalized_suffix_region("HomePageEn", "en", "zh-hant", "HomePageZhHant")]
    #[case::capitalized_suffix_from_region("homePtBr", "pt-br", "ja", "homeJa")]
    // rule 4: lower-case suffix
    #[case::lower_suffix("messagesen", "en", "de", "messagesde")]
    #[case::lower_suffix_to_region("messages_en", "en", "pt-br", "messages_ptBr")]
    // rule 5: append
    #[case::append("dataset", "en", "pt-br", "dataset_ptBr")]
    #[case::append_simple("copy", "en", "fr", "copy_fr")]
    fn test_derive_symbol_name(
        #[case] symbol: &str,
        #[case] source: &str,
        #[case] target: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(derive_symbol_name(symbol, source, target), expected);
    }

    #[test]
    fn test_rule_order_prefers_upper_over_lower() {
        assert_eq!(rule_upper_suffix("HomeEN", "en", "fr").as_deref(), Some("HomeFR"));
        assert_eq!(rule_upper_suffix("homeen", "en", "fr"), None);
        assert_eq!(rule_capitalized_suffix("HomeEN", "en", "fr"), None);
    }

    #[test]
    fn test_append_only_when_no_rule_matches() {
        for (_, rule) in SYMBOL_RULES {
            assert_eq!(rule("dataset", "en", "fr"), None);
        }
        assert_eq!(derive_symbol_name("dataset", "en", "fr"), "dataset_fr");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(derive_symbol_name("HomePageEn", "en", "ko"), "HomePageKo");
        }
    }
}
