//! Field entities.
//!
//! A [`Field`] wraps exactly one form-control node. It records the kind chosen by
//! the classifier, a snapshot of the identifying attributes, and the mutable value
//! that the lifecycle rules manage.

use std::fmt;

use serde::Serialize;

use formwire_protocols::{FieldKind, NodeId, NodeTree};

use crate::classifier::classify_node;
use crate::lifecycle;

/// Current value of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Absent,
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    pub fn single(value: impl Into<String>) -> Self {
        FieldValue::Single(value.into())
    }

    pub fn from_option(value: Option<&str>) -> Self {
        value.map_or(FieldValue::Absent, FieldValue::single)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, FieldValue::Absent)
    }

    /// The scalar value. For collections this is the first entry.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Absent => None,
            FieldValue::Single(value) => Some(value),
            FieldValue::Multiple(values) => values.first().map(String::as_str),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        match self {
            FieldValue::Multiple(values) => values,
            FieldValue::Single(value) => std::slice::from_ref(value),
            FieldValue::Absent => &[],
        }
    }
}

/// Where a field's value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// Computed from the node when the field was loaded.
    Default,
    /// Assigned by a mutator.
    Set,
    /// Re-derived from the node after an unset.
    Unset,
}

/// Image click coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClickPoint {
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Field {
    pub(crate) node: NodeId,
    pub(crate) kind: FieldKind,
    pub(crate) name: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) disabled: bool,
    pub(crate) form: Option<NodeId>,
    pub(crate) value: FieldValue,
    pub(crate) lifecycle: Lifecycle,
    pub(crate) content_type: Option<String>,
    pub(crate) clicked_at: Option<ClickPoint>,
    /// The node's `value` attribute, used by check/choose/click.
    pub(crate) value_attr: Option<String>,
    pub(crate) checked_marker: bool,
}

impl Field {
    /// Build the field for `node`, or `None` if the node is not a form control.
    pub fn load(tree: &dyn NodeTree, node: NodeId) -> Option<Self> {
        let kind = classify_node(tree, node)?;
        Some(Self::with_kind(tree, node, kind))
    }

    /// Build a field with an explicit kind. The value starts at the kind's default.
    pub fn with_kind(tree: &dyn NodeTree, node: NodeId, kind: FieldKind) -> Self {
        let attr = |name: &str| tree.attribute(node, name).map(str::to_string);
        Self {
            node,
            kind,
            name: attr("name"),
            id: attr("id"),
            disabled: tree
                .attribute(node, "disabled")
                .is_some_and(|value| value != "false"),
            form: tree.find_ancestor_by_tag(node, "form"),
            value: lifecycle::default_value(kind, tree, node),
            lifecycle: Lifecycle::Default,
            content_type: None,
            clicked_at: None,
            value_attr: attr("value"),
            checked_marker: tree.attribute(node, "checked") == Some("checked"),
        }
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// The nearest enclosing `form` element.
    pub fn form(&self) -> Option<NodeId> {
        self.form
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Content type chosen alongside a file path.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn clicked_at(&self) -> Option<ClickPoint> {
        self.clicked_at
    }

    /// Whether the markup pre-checks this checkbox or radio.
    pub fn is_checked_in_markup(&self) -> bool {
        matches!(self.kind, FieldKind::Checkbox | FieldKind::Radio) && self.checked_marker
    }

    /// Whether the field name marks a list entry (`tags[]`).
    pub fn has_collection_name(&self) -> bool {
        self.name.as_deref().is_some_and(|name| name.contains("[]"))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} field '{}'", self.kind, name),
            None => write!(f, "{} field {}", self.kind, self.node),
        }
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
