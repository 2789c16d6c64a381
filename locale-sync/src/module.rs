//! Reading message files from disk
//!
//! `.json` files are plain data. `.ts`/`.js` files are modules of the form
//!
//! ```text
//! import type { Messages } from "./types";
//!
//! const en: Messages = { home: { title: "Welcome" } };
//!
//! export default en;
//! ```
//!
//! Modules are parsed with tree-sitter and only literal values are accepted,
//! so nothing in a message file is ever executed.

use std::collections::HashMap;
use std::path::Path;

use indexmap::IndexMap;
use tree_sitter::{Node, Parser as TSParser};

use crate::content::ContentNode;
use crate::error::{SyncError, SyncResult};

/// File extensions recognised as message files
pub const CONTENT_EXTENSIONS: &[&str] = &["ts", "js", "json"];

/// Line prefixes that end the header of a module file
const DECLARATION_PREFIXES: &[&str] = &[
    "const ",
    "let ",
    "var ",
    "export const ",
    "export let ",
    "export var ",
    "export default",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Module,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Some(FileFormat::Json),
            Some("ts") | Some("js") => Some(FileFormat::Module),
            _ => None,
        }
    }
}

/// A parsed message file
#[derive(Debug, Clone, PartialEq)]
pub struct MessageFile {
    pub format: FileFormat,
    /// Imports and comments above the content declaration, trimmed
    pub header: String,
    /// Name of the default-exported constant, if the export is by name
    pub symbol: Option<String>,
    /// Type annotation text without the leading colon, e.g. `Messages`
    pub type_annotation: Option<String>,
    pub content: ContentNode,
}

/// Read and parse the message file at `path`.
pub fn load_message_file(path: &Path) -> SyncResult<MessageFile> {
    let format = FileFormat::from_path(path)
        .ok_or_else(|| SyncError::parse(path, "unsupported message file extension"))?;
    let text = std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
    parse_message_file(&text, format).map_err(|message| SyncError::parse(path, message))
}

/// Parse message file text in the given format.
pub fn parse_message_file(text: &str, format: FileFormat) -> Result<MessageFile, String> {
    match format {
        FileFormat::Json => {
            let content: ContentNode =
                serde_json::from_str(text).map_err(|e| format!("invalid JSON: {}", e))?;
            Ok(MessageFile {
                format,
                header: String::new(),
                symbol: None,
                type_annotation: None,
                content,
            })
        }
        FileFormat::Module => parse_module(text),
    }
}

/// Every line before the first content declaration or default export, trimmed.
pub fn extract_header(source: &str) -> String {
    let header: Vec<&str> = source
        .lines()
        .take_while(|line| {
            let line = line.trim_start();
            !DECLARATION_PREFIXES
                .iter()
                .any(|prefix| line.starts_with(prefix))
        })
        .collect();
    header.join("\n").trim().to_string()
}

struct Declarator<'tree> {
    type_annotation: Option<Node<'tree>>,
    value: Option<Node<'tree>>,
}

fn parse_module(source: &str) -> Result<MessageFile, String> {
    let mut ts_parser = TSParser::new();
    ts_parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .map_err(|e| format!("failed to load TypeScript grammar: {}", e))?;

    let tree = ts_parser
        .parse(source, None)
        .ok_or_else(|| "parser produced no syntax tree".to_string())?;
    let root = tree.root_node();

    if root.has_error() {
        let line = first_error(root).map_or(0, |n| n.start_position().row + 1);
        return Err(format!("syntax error near line {}", line));
    }

    let bytes = source.as_bytes();
    let mut declarators: HashMap<String, Declarator<'_>> = HashMap::new();
    let mut default_export: Option<Node<'_>> = None;

    let mut cursor = root.walk();
    for statement in root.named_children(&mut cursor) {
        match statement.kind() {
            "lexical_declaration" | "variable_declaration" => {
                collect_declarators(statement, bytes, &mut declarators);
            }
            "export_statement" => {
                if let Some(declaration) = statement.child_by_field_name("declaration") {
                    collect_declarators(declaration, bytes, &mut declarators);
                }
                let mut export_cursor = statement.walk();
                let is_default = statement
                    .children(&mut export_cursor)
                    .any(|child| child.kind() == "default");
                if is_default {
                    default_export = statement.child_by_field_name("value");
                }
            }
            _ => {}
        }
    }

    let exported = default_export.ok_or_else(|| "no `export default` statement".to_string())?;
    let exported = unwrap_expression(exported);

    let (symbol, type_annotation, value) = if exported.kind() == "identifier" {
        let name = node_text(exported, bytes);
        let declarator = declarators
            .get(&name)
            .ok_or_else(|| format!("default export `{}` has no top-level declaration", name))?;
        let value = declarator
            .value
            .ok_or_else(|| format!("`{}` is declared without a value", name))?;
        let annotation = declarator.type_annotation.map(|node| {
            node_text(node, bytes)
                .trim_start_matches(':')
                .trim()
                .to_string()
        });
        (Some(name), annotation, value)
    } else {
        (None, None, exported)
    };

    Ok(MessageFile {
        format: FileFormat::Module,
        header: extract_header(source),
        symbol,
        type_annotation,
        content: to_content(value, bytes)?,
    })
}

fn collect_declarators<'tree>(
    declaration: Node<'tree>,
    bytes: &[u8],
    out: &mut HashMap<String, Declarator<'tree>>,
) {
    let mut cursor = declaration.walk();
    for declarator in declaration.named_children(&mut cursor) {
        if declarator.kind() != "variable_declarator" {
            continue;
        }
        if let Some(name) = declarator.child_by_field_name("name") {
            out.insert(
                node_text(name, bytes),
                Declarator {
                    type_annotation: declarator.child_by_field_name("type"),
                    value: declarator.child_by_field_name("value"),
                },
            );
        }
    }
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Strip `( … )`, `… as const`, `… satisfies T` and `…!` around a literal.
fn unwrap_expression(node: Node<'_>) -> Node<'_> {
    match node.kind() {
        "parenthesized_expression"
        | "as_expression"
        | "satisfies_expression"
        | "non_null_expression" => match node.named_child(0) {
            Some(inner) => unwrap_expression(inner),
            None => node,
        },
        _ => node,
    }
}

fn to_content(node: Node<'_>, bytes: &[u8]) -> Result<ContentNode, String> {
    let node = unwrap_expression(node);
    let line = node.start_position().row + 1;

    match node.kind() {
        "object" => {
            let mut entries = IndexMap::new();
            let mut cursor = node.walk();
            for member in node.named_children(&mut cursor) {
                match member.kind() {
                    "comment" => continue,
                    "pair" => {
                        let key = member
                            .child_by_field_name("key")
                            .ok_or_else(|| format!("object entry without key at line {}", line))?;
                        let value = member.child_by_field_name("value").ok_or_else(|| {
                            format!("object entry without value at line {}", line)
                        })?;
                        entries.insert(property_key(key, bytes)?, to_content(value, bytes)?);
                    }
                    other => {
                        return Err(format!(
                            "unsupported object member `{}` at line {}",
                            other,
                            member.start_position().row + 1
                        ));
                    }
                }
            }
            Ok(ContentNode::Mapping(entries))
        }
        "array" => {
            let mut items = Vec::new();
            let mut cursor = node.walk();
            for element in node.named_children(&mut cursor) {
                if element.kind() == "comment" {
                    continue;
                }
                items.push(to_content(element, bytes)?);
            }
            Ok(ContentNode::Sequence(items))
        }
        "string" => Ok(ContentNode::Text(string_literal(node, bytes)?)),
        "template_string" => {
            let mut cursor = node.walk();
            if node
                .named_children(&mut cursor)
                .any(|child| child.kind() == "template_substitution")
            {
                return Err(format!("template substitution at line {}", line));
            }
            Ok(ContentNode::Text(string_literal(node, bytes)?))
        }
        "number" => parse_number(&node_text(node, bytes), false)
            .map(ContentNode::Number)
            .ok_or_else(|| format!("unsupported number literal at line {}", line)),
        "unary_expression" => {
            let operator = node
                .child_by_field_name("operator")
                .map(|op| node_text(op, bytes));
            let argument = node.child_by_field_name("argument");
            match (operator.as_deref(), argument) {
                (Some(op @ ("-" | "+")), Some(arg)) if arg.kind() == "number" => {
                    parse_number(&node_text(arg, bytes), op == "-")
                        .map(ContentNode::Number)
                        .ok_or_else(|| format!("unsupported number literal at line {}", line))
                }
                _ => Err(format!("unsupported expression at line {}", line)),
            }
        }
        "true" => Ok(ContentNode::Bool(true)),
        "false" => Ok(ContentNode::Bool(false)),
        "null" | "undefined" => Ok(ContentNode::Null),
        other => Err(format!(
            "only literal values are allowed in message files, found `{}` at line {}",
            other, line
        )),
    }
}

fn property_key(key: Node<'_>, bytes: &[u8]) -> Result<String, String> {
    match key.kind() {
        "property_identifier" | "number" => Ok(node_text(key, bytes)),
        "string" => string_literal(key, bytes),
        other => Err(format!(
            "unsupported object key `{}` at line {}",
            other,
            key.start_position().row + 1
        )),
    }
}

fn string_literal(node: Node<'_>, bytes: &[u8]) -> Result<String, String> {
    let raw = node_text(node, bytes);
    if raw.len() < 2 {
        return Err(format!(
            "malformed string at line {}",
            node.start_position().row + 1
        ));
    }
    // Delimiters are single ASCII quote characters.
    Ok(unescape(&raw[1..raw.len() - 1]))
}

fn parse_number(text: &str, negative: bool) -> Option<serde_json::Number> {
    let cleaned = text.replace('_', "");
    let lower = cleaned.to_ascii_lowercase();

    let radix = [("0x", 16), ("0o", 8), ("0b", 2)]
        .into_iter()
        .find(|(prefix, _)| lower.starts_with(prefix));
    if let Some((prefix, radix)) = radix {
        let value = i64::from_str_radix(&lower[prefix.len()..], radix).ok()?;
        return Some(serde_json::Number::from(if negative { -value } else { value }));
    }

    if let Ok(value) = cleaned.parse::<i64>() {
        return Some(serde_json::Number::from(if negative { -value } else { value }));
    }
    let value = cleaned.parse::<f64>().ok()?;
    serde_json::Number::from_f64(if negative { -value } else { value })
}

/// Resolve JavaScript string escapes.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let Some(escaped) = chars.next() else {
            out.push('\\');
            break;
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            '\r' => {
                // line continuation
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                push_code_point(&mut out, u32::from_str_radix(&hex, 16).ok(), &hex, 'x');
            }
            'u' => {
                let code = if chars.peek() == Some(&'{') {
                    chars.next();
                    let hex: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    u32::from_str_radix(&hex, 16).ok()
                } else {
                    let hex: String = chars.by_ref().take(4).collect();
                    u32::from_str_radix(&hex, 16).ok().map(|high| {
                        if (0xD800..0xDC00).contains(&high) {
                            low_surrogate(&mut chars)
                                .map(|low| 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
                                .unwrap_or(high)
                        } else {
                            high
                        }
                    })
                };
                match code.and_then(char::from_u32) {
                    Some(c) => out.push(c),
                    None => out.push(char::REPLACEMENT_CHARACTER),
                }
            }
            other => out.push(other),
        }
    }

    out
}

fn low_surrogate(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u32> {
    let mut lookahead = chars.clone();
    if lookahead.next() != Some('\\') || lookahead.next() != Some('u') {
        return None;
    }
    let hex: String = lookahead.by_ref().take(4).collect();
    let low = u32::from_str_radix(&hex, 16).ok()?;
    if !(0xDC00..0xE000).contains(&low) {
        return None;
    }
    *chars = lookahead;
    Some(low)
}

fn push_code_point(out: &mut String, code: Option<u32>, raw: &str, escape: char) {
    match code.and_then(char::from_u32) {
        Some(c) => out.push(c),
        None => {
            out.push(escape);
            out.push_str(raw);
        }
    }
}

fn node_text(node: Node<'_>, bytes: &[u8]) -> String {
    node.utf8_text(bytes).unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MODULE: &str = r#"// Generated from the design system copy deck.
import type { Messages } from "./types";

const en: Messages = {
  home: {
    title: "Mean Arterial Pressure",
    'subtitle': 'Fast & "free"',
    tone: "calm",
  },
  // trailing comment
  list: ["x", `y`],
  count: -3,
  ratio: 0.5,
  enabled: true,
  missing: null,
};

export default en;
"#;

    #[test]
    fn test_parse_module_extracts_symbol_annotation_and_content() {
        let file = parse_message_file(MODULE, FileFormat::Module).unwrap();
        assert_eq!(file.symbol.as_deref(), Some("en"));
        assert_eq!(file.type_annotation.as_deref(), Some("Messages"));
        assert_eq!(
            file.header,
            "// Generated from the design system copy deck.\nimport type { Messages } from \"./types\";"
        );
        assert_eq!(
            file.content,
            ContentNode::from(json!({
                "home": {
                    "title": "Mean Arterial Pressure",
                    "subtitle": "Fast & \"free\"",
                    "tone": "calm"
                },
                "list": ["x", "y"],
                "count": -3,
                "ratio": 0.5,
                "enabled": true,
                "missing": null
            }))
        );
    }

    #[test]
    fn test_parse_export_const_without_annotation() {
        let text = "export const HomePageEn = { \"a\": \"b\" } as const;\nexport default HomePageEn;\n";
        let file = parse_message_file(text, FileFormat::Module).unwrap();
        assert_eq!(file.symbol.as_deref(), Some("HomePageEn"));
        assert_eq!(file.type_annotation, None);
        assert_eq!(file.header, "");
        assert_eq!(file.content, ContentNode::from(json!({"a": "b"})));
    }

    #[test]
    fn test_parse_anonymous_default_export() {
        let text = "export default { greeting: \"Hello\" };\n";
        let file = parse_message_file(text, FileFormat::Module).unwrap();
        assert_eq!(file.symbol, None);
        assert_eq!(file.content, ContentNode::from(json!({"greeting": "Hello"})));
    }

    #[test]
    fn test_rejects_non_literal_values() {
        let text = "const en = { a: someFunction() };\nexport default en;\n";
        let err = parse_message_file(text, FileFormat::Module).unwrap_err();
        assert!(err.contains("literal"), "{}", err);

        let text = "const en = { a: `Hi ${name}` };\nexport default en;\n";
        assert!(parse_message_file(text, FileFormat::Module).is_err());

        let text = "const en = { ...base };\nexport default en;\n";
        assert!(parse_message_file(text, FileFormat::Module).is_err());
    }

    #[test]
    fn test_missing_default_export() {
        let text = "const en = { a: \"b\" };\n";
        let err = parse_message_file(text, FileFormat::Module).unwrap_err();
        assert!(err.contains("export default"));
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let text = "const en = {\n  a: \"b\",\n  c: ,\n};\nexport default en;\n";
        let err = parse_message_file(text, FileFormat::Module).unwrap_err();
        assert!(err.contains("syntax error"), "{}", err);
    }

    #[test]
    fn test_parse_json_file() {
        let file = parse_message_file(r#"{"b": "1", "a": ["2"]}"#, FileFormat::Json).unwrap();
        assert_eq!(file.format, FileFormat::Json);
        assert_eq!(file.symbol, None);
        let keys: Vec<&String> = file.content.as_mapping().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_json_rejects_garbage() {
        assert!(parse_message_file("{not json", FileFormat::Json).is_err());
    }

    #[test]
    fn test_extract_header_stops_at_declaration() {
        let source = "\n// comment\nimport x from \"y\";\n\nexport const a = {};\nexport default a;\n";
        assert_eq!(extract_header(source), "// comment\nimport x from \"y\";");
        assert_eq!(extract_header("const a = {};\n"), "");
    }

    #[test]
    fn test_unescape_sequences() {
        assert_eq!(unescape(r#"a\nb\t\"c\" \'d\'"#), "a\nb\t\"c\" 'd'");
        assert_eq!(unescape(r"é\x41\u{1F600}"), "éA😀");
        assert_eq!(unescape(r"😀"), "😀");
        assert_eq!(unescape("line\\\ncontinued"), "linecontinued");
        assert_eq!(unescape(r"back\\slash"), "back\\slash");
    }

    #[test]
    fn test_parse_number_forms() {
        assert_eq!(parse_number("42", false), Some(serde_json::Number::from(42)));
        assert_eq!(parse_number("1_000", true), Some(serde_json::Number::from(-1000)));
        assert_eq!(parse_number("0xff", false), Some(serde_json::Number::from(255)));
        assert_eq!(
            parse_number("2.5", false),
            serde_json::Number::from_f64(2.5)
        );
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path(Path::new("a/en.ts")), Some(FileFormat::Module));
        assert_eq!(FileFormat::from_path(Path::new("a/en.js")), Some(FileFormat::Module));
        assert_eq!(FileFormat::from_path(Path::new("a/en.json")), Some(FileFormat::Json));
        assert_eq!(FileFormat::from_path(Path::new("a/en.d.ts")), Some(FileFormat::Module));
        assert_eq!(FileFormat::from_path(Path::new("a/en.yaml")), None);
    }
}
