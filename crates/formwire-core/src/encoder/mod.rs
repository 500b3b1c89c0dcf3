//! Parameter encoding.
//!
//! Each enabled, unsuppressed field contributes a small parameter tree built from
//! its `name=value` pair. Contributions are folded into one [`ParamMap`] in
//! document order: mappings merge recursively, arrays concatenate and scalars
//! are overwritten by later fields.

mod escape;
mod nested;

use tracing::debug;

use formwire_config::EncodingProfile;
use formwire_protocols::{map_scalars_in, FieldKind, ParamMap, ParamValue, UploadedFile};

use crate::coordinator;
use crate::field::Field;

pub use escape::{escape, escape_key, unescape_html, unescape_params};
pub use nested::{insert_path, parse_nested_query};

/// Encode every field of one form.
///
/// `fields` must be in document order and contain the whole form, since hidden
/// fields consult same-named checkboxes before contributing.
pub fn encode_fields(fields: &[&Field], profile: EncodingProfile) -> ParamMap {
    let mut params = ParamMap::new();
    for field in fields {
        if field.is_disabled() {
            debug!("Skipping disabled {}", field);
            continue;
        }
        if coordinator::is_suppressed(field, fields, profile) {
            debug!("Suppressing {} in favour of a checked checkbox", field);
            continue;
        }
        if let Some(contribution) = encode_field(field, profile) {
            merge_params(&mut params, contribution);
        }
    }
    params
}

/// A single field's contribution, or `None` when it submits nothing.
pub fn encode_field(field: &Field, profile: EncodingProfile) -> Option<ParamMap> {
    if field.is_disabled() {
        return None;
    }
    let name = field.name()?;

    if field.kind() == FieldKind::MultiSelect {
        return encode_collection(name, field.value().as_slice(), profile);
    }

    let mut params = match field.kind() {
        FieldKind::Checkbox
        | FieldKind::Radio
        | FieldKind::Button
        | FieldKind::Image
        | FieldKind::Reset
            if field.value().is_absent() =>
        {
            None
        }
        _ => Some(encode_scalar(
            name,
            field.value().as_str().unwrap_or_default(),
            profile,
        )),
    };

    if let (FieldKind::File, Some(path)) = (field.kind(), field.value().as_str()) {
        let upload = UploadedFile::new(path, field.content_type().map(str::to_string));
        params = params.map(|contribution| replace_param_value(contribution, path, &upload));
    }

    if let Some(point) = field.clicked_at() {
        let coords = params.get_or_insert_with(ParamMap::new);
        coords.insert(format!("{}.x", name), ParamValue::Scalar(point.x.to_string()));
        coords.insert(format!("{}.y", name), ParamValue::Scalar(point.y.to_string()));
    }

    params
}

/// Generic `name=value` contribution under `profile`.
fn encode_scalar(name: &str, value: &str, profile: EncodingProfile) -> ParamMap {
    let params = match profile {
        EncodingProfile::Nested => {
            parse_nested_query(&format!("{}={}", escape_key(name), escape(value)))
        }
        EncodingProfile::Flat => {
            let mut params = ParamMap::new();
            params.insert(
                name.to_string(),
                ParamValue::Array(vec![ParamValue::scalar(value)]),
            );
            params
        }
    };
    unescape_params(params)
}

/// Multi-select contribution: always an array of the selected values.
///
/// The nested profile appends each value under `name[]`, so `tags` and `tags[]`
/// both give `{ tags: [..] }` and `user[langs][]` lands under `user`. The flat
/// profile keeps the name verbatim. An empty collection submits nothing.
fn encode_collection(name: &str, values: &[String], profile: EncodingProfile) -> Option<ParamMap> {
    if values.is_empty() {
        return None;
    }

    let params = match profile {
        EncodingProfile::Nested => {
            let key = escape_key(name.strip_suffix("[]").unwrap_or(name));
            let query = values
                .iter()
                .map(|value| format!("{}[]={}", key, escape(value)))
                .collect::<Vec<_>>()
                .join("&");
            parse_nested_query(&query)
        }
        EncodingProfile::Flat => {
            let mut params = ParamMap::new();
            params.insert(
                name.to_string(),
                ParamValue::Array(values.iter().map(|v| ParamValue::scalar(v.as_str())).collect()),
            );
            params
        }
    };
    Some(unescape_params(params))
}

/// Replace every scalar equal to `path` with the uploaded file reference.
fn replace_param_value(params: ParamMap, path: &str, upload: &UploadedFile) -> ParamMap {
    map_scalars_in(params, &mut |value| {
        if value == path {
            ParamValue::File(upload.clone())
        } else {
            ParamValue::Scalar(value)
        }
    })
}

/// Fold `incoming` into `params`.
pub fn merge_params(params: &mut ParamMap, incoming: ParamMap) {
    for (key, value) in incoming {
        let value = match (params.get_mut(&key), value) {
            (Some(ParamValue::Map(existing)), ParamValue::Map(inner)) => {
                merge_params(existing, inner);
                continue;
            }
            (Some(ParamValue::Array(existing)), ParamValue::Array(items)) => {
                existing.extend(items);
                continue;
            }
            (_, value) => value,
        };
        params.insert(key, value);
    }
}

#[cfg(test)]
#[path = "encoder_tests.rs"]
mod tests;
