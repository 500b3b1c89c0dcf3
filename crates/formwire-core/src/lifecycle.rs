//! Value lifecycle: default computation and the per-kind mutators.
//!
//! Every field starts at its kind's default, moves to [`Lifecycle::Set`] through a
//! mutator and back to a re-derived default through `unset`. Disabled fields reject
//! `check`, `uncheck`, `choose` and `click`; `set` is always allowed.

use tracing::debug;

use formwire_protocols::{FieldError, FieldKind, FieldResult, NodeId, NodeTree};

use crate::field::{ClickPoint, Field, FieldValue, Lifecycle};
use crate::options::select_options;

/// Value a checked checkbox or radio submits when it has no `value` attribute.
pub const CHECKED_FALLBACK: &str = "on";

/// Compute the default value `kind` derives from `node`.
pub fn default_value(kind: FieldKind, tree: &dyn NodeTree, node: NodeId) -> FieldValue {
    match kind {
        FieldKind::Button | FieldKind::Image | FieldKind::Reset => FieldValue::Absent,
        FieldKind::Checkbox | FieldKind::Radio => checkable_default(tree, node),
        FieldKind::Textarea => FieldValue::Single(tree.inner_text(node)),
        FieldKind::Select => select_default(tree, node),
        FieldKind::MultiSelect => multi_select_default(tree, node),
        FieldKind::Text | FieldKind::Password | FieldKind::File | FieldKind::Hidden => {
            FieldValue::from_option(tree.attribute(node, "value"))
        }
    }
}

fn checkable_default(tree: &dyn NodeTree, node: NodeId) -> FieldValue {
    if tree.attribute(node, "checked") == Some("checked") {
        FieldValue::single(tree.attribute(node, "value").unwrap_or(CHECKED_FALLBACK))
    } else {
        FieldValue::Absent
    }
}

fn select_default(tree: &dyn NodeTree, node: NodeId) -> FieldValue {
    let options = select_options(tree, node);
    let chosen = options
        .iter()
        .find(|option| option.selected)
        .or_else(|| options.first());
    FieldValue::single(chosen.map(|option| option.value.as_str()).unwrap_or_default())
}

fn multi_select_default(tree: &dyn NodeTree, node: NodeId) -> FieldValue {
    let mut values: Vec<String> = Vec::new();
    for option in select_options(tree, node) {
        if option.selected && !values.contains(&option.value) {
            values.push(option.value);
        }
    }
    FieldValue::Multiple(values)
}

impl Field {
    /// Assign a value. Multi-selects append to their collection instead.
    pub fn set(&mut self, value: impl Into<String>) {
        let value = value.into();
        debug!("Set {} to {:?}", self, value);
        if self.kind == FieldKind::MultiSelect {
            match &mut self.value {
                FieldValue::Multiple(values) => values.push(value),
                other => *other = FieldValue::Multiple(vec![value]),
            }
        } else {
            self.value = FieldValue::Single(value);
        }
        self.lifecycle = Lifecycle::Set;
    }

    /// Choose a file for an upload field.
    pub fn set_file(
        &mut self,
        path: impl Into<String>,
        content_type: Option<String>,
    ) -> FieldResult<()> {
        self.require_kind("attach a file to", &[FieldKind::File])?;
        self.set(path);
        self.content_type = content_type;
        Ok(())
    }

    /// Restore the value the node's markup implies.
    pub fn unset(&mut self, tree: &dyn NodeTree) {
        self.value = default_value(self.kind, tree, self.node);
        self.content_type = None;
        self.lifecycle = Lifecycle::Unset;
        debug!("Unset {} back to {:?}", self, self.value);
    }

    /// Remove the first matching entry of a multi-select. Returns whether one was removed.
    pub fn unset_value(&mut self, value: &str) -> FieldResult<bool> {
        self.require_kind("unselect an option of", &[FieldKind::MultiSelect])?;
        let FieldValue::Multiple(values) = &mut self.value else {
            return Ok(false);
        };
        let Some(index) = values.iter().position(|v| v == value) else {
            return Ok(false);
        };
        values.remove(index);
        self.lifecycle = Lifecycle::Unset;
        debug!("Unselected {:?} from {}", value, self);
        Ok(true)
    }

    pub fn check(&mut self) -> FieldResult<()> {
        self.require_kind("check", &[FieldKind::Checkbox])?;
        self.require_enabled()?;
        self.set(self.checked_value());
        Ok(())
    }

    pub fn uncheck(&mut self) -> FieldResult<()> {
        self.require_kind("uncheck", &[FieldKind::Checkbox])?;
        self.require_enabled()?;
        self.clear();
        debug!("Unchecked {}", self);
        Ok(())
    }

    /// Record a click on a button, image or reset control.
    ///
    /// Named buttons take their `value` attribute. Image controls also keep the
    /// click coordinates, `(0, 0)` when none are given. Submitting the form is the
    /// caller's job.
    pub fn press(&mut self, at: Option<ClickPoint>) -> FieldResult<()> {
        self.require_kind(
            "click",
            &[FieldKind::Button, FieldKind::Image, FieldKind::Reset],
        )?;
        self.require_enabled()?;

        if self.kind == FieldKind::Image {
            self.clicked_at = Some(at.unwrap_or(ClickPoint { x: 0, y: 0 }));
        }
        if self.kind != FieldKind::Reset
            && self.name.as_deref().is_some_and(|name| !name.trim().is_empty())
        {
            self.value = FieldValue::from_option(self.value_attr.as_deref());
            self.lifecycle = Lifecycle::Set;
        }
        debug!("Clicked {}", self);
        Ok(())
    }

    /// Reset to the markup state, forgetting clicks and chosen content types.
    pub fn reset(&mut self, tree: &dyn NodeTree) {
        self.clicked_at = None;
        self.unset(tree);
    }

    /// Value a checkbox or radio holds when selected.
    pub(crate) fn checked_value(&self) -> String {
        self.value_attr
            .clone()
            .unwrap_or_else(|| CHECKED_FALLBACK.to_string())
    }

    /// Drop the value entirely. Used by uncheck and radio group exclusivity.
    pub(crate) fn clear(&mut self) {
        self.value = if self.kind == FieldKind::MultiSelect {
            FieldValue::Multiple(Vec::new())
        } else {
            FieldValue::Absent
        };
        self.lifecycle = Lifecycle::Set;
    }

    pub(crate) fn require_enabled(&self) -> FieldResult<()> {
        if self.disabled {
            return Err(FieldError::DisabledField(self.to_string()));
        }
        Ok(())
    }

    pub(crate) fn require_kind(&self, action: &'static str, kinds: &[FieldKind]) -> FieldResult<()> {
        if kinds.contains(&self.kind) {
            Ok(())
        } else {
            Err(FieldError::WrongKind {
                action,
                actual: self.kind,
            })
        }
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
