//! Label type.

use serde::{Deserialize, Serialize};

use crate::NodeId;

/// A `label` element associated with a field, either by wrapping it or via `for`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub node: NodeId,
    pub text: String,
}

impl Label {
    pub fn new(node: NodeId, text: impl Into<String>) -> Self {
        Self {
            node,
            text: text.into(),
        }
    }
}
