//! HTML entity decoding for providers that return escaped text

use regex::{Captures, Regex};
use std::sync::LazyLock;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9a-fA-F]+)|#([0-9]+)|(quot|apos|lt|gt|amp));").expect("valid regex")
});

/// Decode the HTML entities machine translation APIs emit in plain-text mode.
///
/// Named entities (`&quot;`, `&apos;`, `&lt;`, `&gt;`, `&amp;`) and numeric
/// ones (`&#39;`, `&#x2F;`) are replaced in a single left-to-right pass, so
/// the output of one replacement is never decoded again: `&amp;lt;` and
/// `&#38;lt;` both become the literal `&lt;`.
///
/// # Arguments
///
/// * `text` - Text as returned by the provider
///
/// # Returns
///
/// The decoded text. Unknown or malformed entities are left as they are.
pub fn decode_html_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let decoded = match (caps.get(1), caps.get(2), caps.get(3)) {
                (Some(hex), _, _) => u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32),
                (_, Some(dec), _) => dec.as_str().parse::<u32>().ok().and_then(char::from_u32),
                (_, _, Some(name)) => match name.as_str() {
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "amp" => Some('&'),
                    _ => None,
                },
                _ => None,
            };
            decoded.map_or_else(|| caps[0].to_string(), |ch| ch.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_all_common_entities() {
        assert_eq!(
            decode_html_entities("&quot;a&quot; &#39;b&#39; &amp; &lt;c&gt; d&#x2F;e"),
            "\"a\" 'b' & <c> d/e"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(decode_html_entities("Bonjour le monde"), "Bonjour le monde");
    }

    #[test]
    fn test_amp_decoded_once() {
        assert_eq!(decode_html_entities("&amp;lt;"), "&lt;");
        assert_eq!(decode_html_entities("&amp;#39;"), "&#39;");
    }

    #[test]
    fn test_numeric_ampersand_not_decoded_twice() {
        assert_eq!(decode_html_entities("&#38;lt;"), "&lt;");
        assert_eq!(decode_html_entities("&#x26;quot;b&#x26;quot;"), "&quot;b&quot;");
        assert_eq!(decode_html_entities("&#38;#39;"), "&#39;");
    }

    #[test]
    fn test_unknown_entities_left_alone() {
        assert_eq!(decode_html_entities("&nbsp; &#xZZ;"), "&nbsp; &#xZZ;");
    }

    #[test]
    fn test_decimal_and_hex_numeric_entities() {
        assert_eq!(decode_html_entities("&#233;t&#xE9;"), "été");
    }
}
