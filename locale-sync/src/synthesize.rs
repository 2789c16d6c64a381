//! Rendering merged content back into a locale file

use crate::content::ContentNode;
use crate::error::SyncResult;
use crate::module::{FileFormat, MessageFile};
use crate::symbol::derive_symbol_name;

/// Render the target-locale file for `merged`, modelled on `source`.
///
/// JSON sources produce pretty-printed JSON. Module sources keep their
/// header, get a symbol renamed for `target_locale`, and keep the type
/// annotation:
///
/// ```text
/// <header>
///
/// const HomePageZh: Messages = { … };
///
/// export default HomePageZh;
/// ```
pub fn synthesize(
    source: &MessageFile,
    source_locale: &str,
    target_locale: &str,
    merged: &ContentNode,
) -> SyncResult<String> {
    let literal = serde_json::to_string_pretty(merged)?;

    match source.format {
        FileFormat::Json => Ok(format!("{}\n", literal)),
        FileFormat::Module => {
            let source_symbol = source.symbol.as_deref().unwrap_or(source_locale);
            let symbol = derive_symbol_name(source_symbol, source_locale, target_locale);
            let annotation = source
                .type_annotation
                .as_deref()
                .map(|ty| format!(": {}", ty))
                .unwrap_or_default();

            let body = format!(
                "const {symbol}{annotation} = {literal};\n\nexport default {symbol};\n"
            );

            let header = source.header.trim();
            if header.is_empty() {
                Ok(body)
            } else {
                Ok(format!("{}\n\n{}", header, body))
            }
        }
    }
}
