//! Arena-backed element tree.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use tracing::debug;

use formwire_protocols::{NodeId, NodeTree};

use crate::error::DomError;
use crate::spec::ElementSpec;

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    attrs: IndexMap<String, String>,
    text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Element tree with stable [`NodeId`]s. Ids are never reused; node 0 is the root.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Element>,
}

impl Document {
    /// Create a document holding a single root element.
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![Element {
                tag: root_tag.to_ascii_lowercase(),
                attrs: IndexMap::new(),
                text: String::new(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// Build a document whose root is `spec`.
    pub fn from_spec(spec: &ElementSpec) -> Result<Self, DomError> {
        validate_tag(&spec.tag)?;
        let mut doc = Self::new(&spec.tag);
        let root = doc.root();
        doc.nodes[root.0].attrs = spec.attrs.clone();
        doc.nodes[root.0].text = spec.text.clone();
        for child in &spec.children {
            doc.append_spec(root, child)?;
        }
        debug!("Built document with {} elements", doc.len());
        Ok(doc)
    }

    /// Parse an [`ElementSpec`] JSON description.
    pub fn from_json(json: &str) -> Result<Self, DomError> {
        let spec: ElementSpec = serde_json::from_str(json)?;
        Self::from_spec(&spec)
    }

    /// Read an [`ElementSpec`] JSON file.
    pub fn load(path: &Path) -> Result<Self, DomError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Append a childless element under `parent`.
    pub fn append_element(
        &mut self,
        parent: NodeId,
        tag: &str,
        attrs: &[(&str, &str)],
    ) -> Result<NodeId, DomError> {
        let mut spec = ElementSpec::new(tag);
        for (name, value) in attrs {
            spec = spec.attr(*name, *value);
        }
        self.append_spec(parent, &spec)
    }

    /// Append `spec` and its subtree under `parent`, returning the new element's id.
    pub fn append_spec(&mut self, parent: NodeId, spec: &ElementSpec) -> Result<NodeId, DomError> {
        validate_tag(&spec.tag)?;
        if parent.0 >= self.nodes.len() {
            return Err(DomError::UnknownNode(parent));
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: spec.tag.to_ascii_lowercase(),
            attrs: spec.attrs.clone(),
            text: spec.text.clone(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);

        for child in &spec.children {
            self.append_spec(id, child)?;
        }
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// First element in document order with `tag` and `attr == value`.
    pub fn find_first(&self, tag: &str, attr: &str, value: &str) -> Option<NodeId> {
        std::iter::once(self.root())
            .chain(self.descendants(self.root()))
            .find(|id| self.is_tag(*id, tag) && self.attribute(*id, attr) == Some(value))
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.nodes.get(node.0)
    }
}

fn validate_tag(tag: &str) -> Result<(), DomError> {
    if tag.trim().is_empty() {
        return Err(DomError::InvalidSpec("element tag cannot be empty".to_string()));
    }
    if tag.contains(|c: char| c.is_whitespace() || c == '<' || c == '>') {
        return Err(DomError::InvalidSpec(format!("invalid tag name '{}'", tag)));
    }
    Ok(())
}

impl NodeTree for Document {
    fn root(&self) -> NodeId {
        NodeId(0)
    }

    fn tag_name(&self, node: NodeId) -> Option<&str> {
        self.element(node).map(|e| e.tag.as_str())
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)?.attrs.get(name).map(String::as_str)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.element(node)?.parent
    }

    fn children(&self, node: NodeId) -> &[NodeId] {
        self.element(node)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    fn inner_text(&self, node: NodeId) -> String {
        let Some(element) = self.element(node) else {
            return String::new();
        };
        let mut text = element.text.clone();
        for child in &element.children {
            text.push_str(&self.inner_text(*child));
        }
        text
    }
}

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;
