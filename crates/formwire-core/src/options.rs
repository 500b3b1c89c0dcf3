//! `option` elements of select fields.

use serde::Serialize;

use formwire_protocols::{NodeId, NodeTree};

/// Markers that count as a selected option.
const SELECTED_MARKERS: [&str; 2] = ["selected", "checked"];

/// One `option` of a select field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub node: NodeId,
    /// The `value` attribute, or the option text when absent.
    pub value: String,
    pub text: String,
    pub selected: bool,
}

/// Options of `select` in document order.
pub fn select_options(tree: &dyn NodeTree, select: NodeId) -> Vec<SelectOption> {
    tree.descendants_by_tag(select, &["option"])
        .into_iter()
        .map(|node| {
            let text = tree.inner_text(node);
            let value = tree
                .attribute(node, "value")
                .map(str::to_string)
                .unwrap_or_else(|| text.clone());
            let selected = tree
                .attribute(node, "selected")
                .is_some_and(|marker| SELECTED_MARKERS.contains(&marker));
            SelectOption {
                node,
                value,
                text,
                selected,
            }
        })
        .collect()
}
