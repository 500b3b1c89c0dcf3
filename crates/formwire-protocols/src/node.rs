//! Node tree protocol.
//!
//! The field layer never owns markup. It reads tags, attributes and text through
//! [`NodeTree`] and addresses nodes by [`NodeId`], which doubles as the identity
//! key for memoized fields.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an element within a [`NodeTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Read-only access to an element tree.
///
/// Only element nodes are addressable; text is reached through
/// [`NodeTree::inner_text`]. Lookups on an id the tree does not know return
/// `None` or an empty slice rather than failing.
pub trait NodeTree {
    /// The document root.
    fn root(&self) -> NodeId;

    /// Lowercase tag name.
    fn tag_name(&self, node: NodeId) -> Option<&str>;

    /// Raw attribute value. Valueless attributes (`<select multiple>`) report `Some("")`.
    fn attribute(&self, node: NodeId, name: &str) -> Option<&str>;

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Element children in document order.
    fn children(&self, node: NodeId) -> &[NodeId];

    /// Concatenated text of the node and all of its descendants.
    fn inner_text(&self, node: NodeId) -> String;

    fn has_attribute(&self, node: NodeId, name: &str) -> bool {
        self.attribute(node, name).is_some()
    }

    /// Tag comparison that tolerates trees which keep the source casing.
    fn is_tag(&self, node: NodeId, tag: &str) -> bool {
        self.tag_name(node)
            .is_some_and(|name| name.eq_ignore_ascii_case(tag))
    }

    /// All descendants of `node` in document order, excluding `node` itself.
    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Descendants whose tag is one of `tags`, in document order.
    fn descendants_by_tag(&self, node: NodeId, tags: &[&str]) -> Vec<NodeId> {
        self.descendants(node)
            .into_iter()
            .filter(|candidate| tags.iter().any(|tag| self.is_tag(*candidate, tag)))
            .collect()
    }

    /// Nearest strict ancestor with the given tag.
    fn find_ancestor_by_tag(&self, node: NodeId, tag: &str) -> Option<NodeId> {
        let mut cursor = self.parent(node);
        while let Some(parent) = cursor {
            if self.is_tag(parent, tag) {
                return Some(parent);
            }
            cursor = self.parent(parent);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// root(0) -> [form(1) -> [input(2), p(3) -> [input(4)]], input(5)]
    struct FixedTree {
        tags: Vec<&'static str>,
        parents: Vec<Option<NodeId>>,
        children: Vec<Vec<NodeId>>,
    }

    impl FixedTree {
        fn new() -> Self {
            Self {
                tags: vec!["html", "form", "input", "p", "input", "INPUT"],
                parents: vec![
                    None,
                    Some(NodeId(0)),
                    Some(NodeId(1)),
                    Some(NodeId(1)),
                    Some(NodeId(3)),
                    Some(NodeId(0)),
                ],
                children: vec![
                    vec![NodeId(1), NodeId(5)],
                    vec![NodeId(2), NodeId(3)],
                    vec![],
                    vec![NodeId(4)],
                    vec![],
                    vec![],
                ],
            }
        }
    }

    impl NodeTree for FixedTree {
        fn root(&self) -> NodeId {
            NodeId(0)
        }

        fn tag_name(&self, node: NodeId) -> Option<&str> {
            self.tags.get(node.0).copied()
        }

        fn attribute(&self, _node: NodeId, _name: &str) -> Option<&str> {
            None
        }

        fn parent(&self, node: NodeId) -> Option<NodeId> {
            self.parents.get(node.0).copied().flatten()
        }

        fn children(&self, node: NodeId) -> &[NodeId] {
            self.children.get(node.0).map(Vec::as_slice).unwrap_or(&[])
        }

        fn inner_text(&self, _node: NodeId) -> String {
            String::new()
        }
    }

    #[test]
    fn test_descendants_document_order() {
        let tree = FixedTree::new();
        let ids: Vec<usize> = tree.descendants(NodeId(0)).iter().map(|n| n.0).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_descendants_by_tag_ignores_case() {
        let tree = FixedTree::new();
        let inputs = tree.descendants_by_tag(NodeId(0), &["input"]);
        assert_eq!(inputs, vec![NodeId(2), NodeId(4), NodeId(5)]);
    }

    #[test]
    fn test_find_ancestor_by_tag() {
        let tree = FixedTree::new();
        assert_eq!(tree.find_ancestor_by_tag(NodeId(4), "form"), Some(NodeId(1)));
        assert_eq!(tree.find_ancestor_by_tag(NodeId(5), "form"), None);
        assert_eq!(tree.find_ancestor_by_tag(NodeId(1), "form"), None);
    }

    #[test]
    fn test_unknown_node_is_empty() {
        let tree = FixedTree::new();
        assert!(tree.descendants(NodeId(99)).is_empty());
        assert_eq!(tree.tag_name(NodeId(99)), None);
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(NodeId(7).to_string(), "#7");
    }
}
