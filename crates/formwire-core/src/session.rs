//! Form session: field memoization and form-level operations.
//!
//! The session owns the node tree and keeps one [`Field`] per control node.
//! Looking a node up twice returns the same instance, so values set through the
//! session survive until the session is dropped. Operations that touch more than
//! one field (radio groups, submission, reset) live here.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, info, warn};

use formwire_config::EncodingProfile;
use formwire_protocols::{
    FieldError, FieldKind, FieldResult, FormSubmitter, Label, NodeId, NodeTree, ParamMap,
    RecordingSubmitter,
};

use crate::classifier::CONTROL_TAGS;
use crate::coordinator;
use crate::encoder;
use crate::field::{ClickPoint, Field, FieldValue};

pub struct FormSession<T: NodeTree, S: FormSubmitter = RecordingSubmitter> {
    tree: T,
    submitter: S,
    profile: EncodingProfile,
    fields: HashMap<NodeId, Field>,
    labels: HashMap<NodeId, Vec<Label>>,
}

impl<T: NodeTree> FormSession<T, RecordingSubmitter> {
    /// Session that records submissions in memory.
    pub fn new(tree: T) -> Self {
        Self::with_submitter(tree, RecordingSubmitter::new())
    }
}

impl<T: NodeTree, S: FormSubmitter> FormSession<T, S> {
    pub fn with_submitter(tree: T, submitter: S) -> Self {
        Self {
            tree,
            submitter,
            profile: EncodingProfile::default(),
            fields: HashMap::new(),
            labels: HashMap::new(),
        }
    }

    pub fn with_profile(mut self, profile: EncodingProfile) -> Self {
        self.profile = profile;
        self
    }

    pub fn profile(&self) -> EncodingProfile {
        self.profile
    }

    pub fn tree(&self) -> &T {
        &self.tree
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    // ---- Lookup ----

    /// The memoized field for `node`, created on first access.
    pub fn field(&mut self, node: NodeId) -> FieldResult<&Field> {
        self.load(node).map(|field| &*field)
    }

    pub fn field_mut(&mut self, node: NodeId) -> FieldResult<&mut Field> {
        self.load(node)
    }

    /// A field that has already been loaded.
    pub fn cached_field(&self, node: NodeId) -> Option<&Field> {
        self.fields.get(&node)
    }

    pub fn value(&mut self, node: NodeId) -> FieldResult<FieldValue> {
        Ok(self.load(node)?.value().clone())
    }

    fn load(&mut self, node: NodeId) -> FieldResult<&mut Field> {
        match self.fields.entry(node) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let field = Field::load(&self.tree, node).ok_or(FieldError::UnknownField(node))?;
                debug!("Loaded {} at {}", field, node);
                Ok(entry.insert(field))
            }
        }
    }

    fn with_field<R>(
        &mut self,
        node: NodeId,
        f: impl FnOnce(&mut Field, &dyn NodeTree) -> FieldResult<R>,
    ) -> FieldResult<R> {
        self.load(node)?;
        let field = self
            .fields
            .get_mut(&node)
            .ok_or(FieldError::UnknownField(node))?;
        f(field, &self.tree)
    }

    /// Nearest `form` ancestor of `node`.
    pub fn form_of(&self, node: NodeId) -> Option<NodeId> {
        self.tree.find_ancestor_by_tag(node, "form")
    }

    /// Every `form` element in document order.
    pub fn forms(&self) -> Vec<NodeId> {
        let root = self.tree.root();
        let mut forms: Vec<NodeId> = self.tree.is_tag(root, "form").then_some(root).into_iter().collect();
        forms.extend(self.tree.descendants_by_tag(root, &["form"]));
        forms
    }

    /// Control nodes owned by `form` in document order. `None` selects the
    /// controls that sit outside any form.
    pub fn control_nodes(&self, form: Option<NodeId>) -> Vec<NodeId> {
        let scope = form.unwrap_or_else(|| self.tree.root());
        self.tree
            .descendants_by_tag(scope, &CONTROL_TAGS)
            .into_iter()
            .filter(|node| self.form_of(*node) == form)
            .collect()
    }

    /// Load and return the fields of `form`.
    pub fn fields_in(&mut self, form: Option<NodeId>) -> FieldResult<Vec<NodeId>> {
        let nodes = self.control_nodes(form);
        for node in &nodes {
            self.load(*node)?;
        }
        Ok(nodes)
    }

    /// Fields of `form` named `name`, optionally restricted to one kind.
    pub fn fields_named(
        &mut self,
        form: Option<NodeId>,
        name: &str,
        kind: Option<FieldKind>,
    ) -> FieldResult<Vec<NodeId>> {
        let nodes = self.fields_in(form)?;
        Ok(nodes
            .into_iter()
            .filter(|node| {
                self.fields.get(node).is_some_and(|field| {
                    field.name() == Some(name) && kind.is_none_or(|kind| field.kind() == kind)
                })
            })
            .collect())
    }

    fn all_controls(&self) -> Vec<NodeId> {
        self.tree.descendants_by_tag(self.tree.root(), &CONTROL_TAGS)
    }

    /// First control in the document with the given `name`.
    pub fn field_named(&mut self, name: &str) -> FieldResult<NodeId> {
        self.find_control(name, |field| field.name() == Some(name))
    }

    /// First control with the given `name` whose `value` attribute is `value`.
    /// Used to pick one radio out of a group.
    pub fn field_named_with_value(&mut self, name: &str, value: &str) -> FieldResult<NodeId> {
        let label = format!("{}={}", name, value);
        self.find_control(&label, |field| {
            field.name() == Some(name) && field.value_attr.as_deref() == Some(value)
        })
    }

    /// Control with the given `id` attribute.
    pub fn field_by_id(&mut self, id: &str) -> FieldResult<NodeId> {
        self.find_control(id, |field| field.id() == Some(id))
    }

    /// First control whose label text matches `text` after trimming.
    pub fn field_labeled(&mut self, text: &str) -> FieldResult<NodeId> {
        let wanted = text.trim();
        for node in self.all_controls() {
            if self
                .labels_for(node)?
                .iter()
                .any(|label| label.text == wanted)
            {
                return Ok(node);
            }
        }
        Err(FieldError::NotFound(text.to_string()))
    }

    fn find_control(
        &mut self,
        description: &str,
        matches: impl Fn(&Field) -> bool,
    ) -> FieldResult<NodeId> {
        for node in self.all_controls() {
            if matches(self.load(node)?) {
                return Ok(node);
            }
        }
        Err(FieldError::NotFound(description.to_string()))
    }

    // ---- Labels ----

    /// Labels of a field: the wrapping `label` first, then any `label[for=id]`
    /// inside the owning form.
    pub fn labels_for(&mut self, node: NodeId) -> FieldResult<Vec<Label>> {
        if let Some(labels) = self.labels.get(&node) {
            return Ok(labels.clone());
        }

        let field = self.load(node)?;
        let id = field.id().map(str::to_string);
        let form = field.form();

        let mut labels = Vec::new();
        if let Some(wrapper) = self.tree.find_ancestor_by_tag(node, "label") {
            labels.push(self.label(wrapper));
        }
        if let Some(id) = id.filter(|id| !id.trim().is_empty()) {
            let scope = form.unwrap_or_else(|| self.tree.root());
            for candidate in self.tree.descendants_by_tag(scope, &["label"]) {
                if self.tree.attribute(candidate, "for") == Some(id.as_str())
                    && !labels.iter().any(|label| label.node == candidate)
                {
                    labels.push(self.label(candidate));
                }
            }
        }

        self.labels.insert(node, labels.clone());
        Ok(labels)
    }

    /// Text of the field's first label.
    pub fn label_text(&mut self, node: NodeId) -> FieldResult<Option<String>> {
        Ok(self.labels_for(node)?.into_iter().next().map(|label| label.text))
    }

    fn label(&self, node: NodeId) -> Label {
        Label::new(node, self.tree.inner_text(node).trim())
    }

    // ---- Mutators ----

    pub fn set(&mut self, node: NodeId, value: &str) -> FieldResult<()> {
        self.load(node)?.set(value);
        Ok(())
    }

    pub fn set_file(
        &mut self,
        node: NodeId,
        path: &str,
        content_type: Option<String>,
    ) -> FieldResult<()> {
        self.load(node)?.set_file(path, content_type)
    }

    pub fn unset(&mut self, node: NodeId) -> FieldResult<()> {
        self.with_field(node, |field, tree| {
            field.unset(tree);
            Ok(())
        })
    }

    /// Remove one entry from a multi-select.
    pub fn unset_value(&mut self, node: NodeId, value: &str) -> FieldResult<bool> {
        self.load(node)?.unset_value(value)
    }

    pub fn check(&mut self, node: NodeId) -> FieldResult<()> {
        self.load(node)?.check()
    }

    pub fn uncheck(&mut self, node: NodeId) -> FieldResult<()> {
        self.load(node)?.uncheck()
    }

    /// Select a radio button, clearing every other same-named field of its form.
    pub fn choose(&mut self, node: NodeId) -> FieldResult<()> {
        let field = self.load(node)?;
        field.require_kind("choose", &[FieldKind::Radio])?;
        field.require_enabled()?;
        let form = field.form();

        let nodes = self.fields_in(form)?;
        let target = self
            .fields
            .get(&node)
            .ok_or(FieldError::UnknownField(node))?;
        let group = coordinator::exclusive_group(
            target,
            nodes.iter().filter_map(|other| self.fields.get(other)),
        );
        for other in group {
            if let Some(other) = self.fields.get_mut(&other) {
                other.clear();
            }
        }

        let field = self.load(node)?;
        let value = field.checked_value();
        field.set(value);
        Ok(())
    }

    /// Click a button, image or reset control.
    ///
    /// Buttons and images submit their form afterwards; reset controls restore
    /// every field of their form to its default.
    pub fn click(&mut self, node: NodeId) -> FieldResult<()> {
        self.click_with(node, None)
    }

    /// Click an image control at the given coordinates.
    pub fn click_at(&mut self, node: NodeId, x: i64, y: i64) -> FieldResult<()> {
        self.click_with(node, Some(ClickPoint { x, y }))
    }

    fn click_with(&mut self, node: NodeId, at: Option<ClickPoint>) -> FieldResult<()> {
        let field = self.load(node)?;
        field.press(at)?;
        let kind = field.kind();
        let form = field.form();

        if kind == FieldKind::Reset {
            return self.reset_form(form);
        }
        match form {
            Some(form) => {
                let params = self.encode_form(Some(form))?;
                info!("Submitting form {} with {} parameters", form, params.len());
                self.submitter.submit(form, &params);
            }
            None => warn!("Clicked {} outside of any form, nothing to submit", node),
        }
        Ok(())
    }

    /// Restore every field of `form` to the value its markup implies.
    pub fn reset_form(&mut self, form: Option<NodeId>) -> FieldResult<()> {
        let nodes = self.fields_in(form)?;
        let tree = &self.tree;
        for node in nodes {
            if let Some(field) = self.fields.get_mut(&node) {
                field.reset(tree);
            }
        }
        debug!("Reset form {:?}", form);
        Ok(())
    }

    // ---- Encoding ----

    /// Encode the fields of `form` into request parameters.
    pub fn encode_form(&mut self, form: Option<NodeId>) -> FieldResult<ParamMap> {
        let nodes = self.fields_in(form)?;
        let fields: Vec<&Field> = nodes
            .iter()
            .filter_map(|node| self.fields.get(node))
            .collect();
        let params = encoder::encode_fields(&fields, self.profile);
        debug!(
            "Encoded {} fields into {} parameters ({} profile)",
            fields.len(),
            params.len(),
            self.profile
        );
        Ok(params)
    }

    /// A single field's contribution, ignoring the rest of its form.
    pub fn encode_field(&mut self, node: NodeId) -> FieldResult<Option<ParamMap>> {
        let profile = self.profile;
        Ok(encoder::encode_field(self.load(node)?, profile))
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
