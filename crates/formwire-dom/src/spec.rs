//! Serializable element description.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Declarative description of an element and its subtree.
///
/// ```json
/// { "tag": "select", "attrs": { "name": "color", "multiple": "" },
///   "children": [ { "tag": "option", "attrs": { "selected": "selected" }, "text": "Red" } ] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,

    /// Attributes in source order. Valueless attributes use an empty string.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attrs: IndexMap<String, String>,

    /// Text that precedes the children.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ElementSpec>,
}

impl ElementSpec {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn child(mut self, child: ElementSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = ElementSpec>) -> Self {
        self.children.extend(children);
        self
    }

    /// Shorthand for `<input type=.. name=..>`.
    pub fn input(kind: &str, name: &str) -> Self {
        Self::new("input").attr("type", kind).attr("name", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let spec: ElementSpec = serde_json::from_str(r#"{"tag": "form"}"#).unwrap();
        assert_eq!(spec.tag, "form");
        assert!(spec.attrs.is_empty());
        assert!(spec.children.is_empty());
    }

    #[test]
    fn test_deserialize_nested() {
        let json = r#"{
            "tag": "form",
            "children": [
                {"tag": "input", "attrs": {"type": "text", "name": "q"}},
                {"tag": "textarea", "attrs": {"name": "body"}, "text": "hi"}
            ]
        }"#;
        let spec: ElementSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec.children.len(), 2);
        assert_eq!(spec.children[0].attrs.get("name").map(String::as_str), Some("q"));
        assert_eq!(spec.children[1].text, "hi");
    }

    #[test]
    fn test_builder_matches_json() {
        let built = ElementSpec::new("form").child(ElementSpec::input("text", "q"));
        let parsed: ElementSpec = serde_json::from_str(
            r#"{"tag": "form", "children": [{"tag": "input", "attrs": {"type": "text", "name": "q"}}]}"#,
        )
        .unwrap();
        assert_eq!(built, parsed);
    }
}
