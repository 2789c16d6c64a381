//! The recursive content tree that gets merged
//!
//! Message files are trees of strings, ordered lists and key-value
//! mappings. Other scalars ride along untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One node of a message tree.
///
/// Mappings keep their keys in file order so regenerated files list keys in
/// the same order as the source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentNode {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    Sequence(Vec<ContentNode>),
    Mapping(IndexMap<String, ContentNode>),
}

impl ContentNode {
    pub fn text(value: impl Into<String>) -> Self {
        ContentNode::Text(value.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentNode::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[ContentNode]> {
        match self {
            ContentNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&IndexMap<String, ContentNode>> {
        match self {
            ContentNode::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a child by mapping key.
    pub fn get(&self, key: &str) -> Option<&ContentNode> {
        self.as_mapping().and_then(|entries| entries.get(key))
    }

    /// A string with at least one non-whitespace character.
    ///
    /// Blank existing translations count as missing.
    pub fn is_usable_translation(&self) -> bool {
        self.as_text().is_some_and(|text| !text.trim().is_empty())
    }
}

impl From<serde_json::Value> for ContentNode {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => ContentNode::Null,
            serde_json::Value::Bool(b) => ContentNode::Bool(b),
            serde_json::Value::Number(n) => ContentNode::Number(n),
            serde_json::Value::String(s) => ContentNode::Text(s),
            serde_json::Value::Array(items) => {
                ContentNode::Sequence(items.into_iter().map(ContentNode::from).collect())
            }
            serde_json::Value::Object(entries) => ContentNode::Mapping(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, ContentNode::from(v)))
                    .collect(),
            ),
        }
    }
}
