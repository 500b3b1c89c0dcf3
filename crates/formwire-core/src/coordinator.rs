//! Relationships between same-named fields of one form.
//!
//! Radio exclusivity is enforced when a radio is chosen, so the only decision
//! left at encode time is hidden-field suppression: a hidden fallback such as
//! `<input type=hidden name=subscribe value=0>` yields to a checked checkbox of
//! the same name. Hidden fields named as list entries (`ids[]`) always submit.

use formwire_config::EncodingProfile;
use formwire_protocols::{FieldKind, NodeId};

use crate::encoder::encode_field;
use crate::field::Field;

/// Whether `field` should be left out because another field takes precedence.
pub fn is_suppressed(field: &Field, form_fields: &[&Field], profile: EncodingProfile) -> bool {
    if field.kind() != FieldKind::Hidden || field.has_collection_name() {
        return false;
    }
    let Some(name) = field.name() else {
        return false;
    };

    form_fields
        .iter()
        .filter(|other| {
            other.kind() == FieldKind::Checkbox
                && other.name() == Some(name)
                && other.form() == field.form()
        })
        .any(|checkbox| encode_field(checkbox, profile).is_some_and(|params| !params.is_empty()))
}

/// Fields that lose their value when `field` is chosen: every other field of the
/// same form sharing its name, whatever its kind. Unnamed fields form no group.
pub fn exclusive_group<'a>(
    field: &Field,
    candidates: impl IntoIterator<Item = &'a Field>,
) -> Vec<NodeId> {
    let Some(name) = field.name() else {
        return Vec::new();
    };
    candidates
        .into_iter()
        .filter(|other| {
            other.node() != field.node() && other.form() == field.form() && other.name() == Some(name)
        })
        .map(Field::node)
        .collect()
}
