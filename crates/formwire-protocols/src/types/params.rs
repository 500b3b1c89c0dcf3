//! Parameter tree types.
//!
//! A [`ParamMap`] is the decoded form of a nested query string such as
//! `user[name]=x&user[tags][]=a&user[tags][]=b`. Insertion order is kept so
//! serialized output is stable.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping at the top of (and inside) a parameter tree.
pub type ParamMap = IndexMap<String, ParamValue>;

/// One node of a parameter tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Scalar(String),
    Array(Vec<ParamValue>),
    Map(ParamMap),
    /// Opaque reference that replaces a file field's path in the tree.
    File(UploadedFile),
}

impl ParamValue {
    pub fn scalar(value: impl Into<String>) -> Self {
        ParamValue::Scalar(value.into())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ParamValue]> {
        match self {
            ParamValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ParamMap> {
        match self {
            ParamValue::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_file(&self) -> Option<&UploadedFile> {
        match self {
            ParamValue::File(file) => Some(file),
            _ => None,
        }
    }

    /// Follow a path of mapping keys.
    pub fn get_path(&self, path: &[&str]) -> Option<&ParamValue> {
        let mut current = self;
        for key in path {
            current = current.as_map()?.get(*key)?;
        }
        Some(current)
    }

    /// Rewrite every scalar leaf, leaving containers and file references in place.
    pub fn map_scalars(self, f: &mut impl FnMut(String) -> ParamValue) -> ParamValue {
        match self {
            ParamValue::Scalar(s) => f(s),
            ParamValue::Array(items) => {
                ParamValue::Array(items.into_iter().map(|item| item.map_scalars(f)).collect())
            }
            ParamValue::Map(map) => ParamValue::Map(map_scalars_in(map, f)),
            file @ ParamValue::File(_) => file,
        }
    }
}

/// [`ParamValue::map_scalars`] over every value of a map.
pub fn map_scalars_in(map: ParamMap, f: &mut impl FnMut(String) -> ParamValue) -> ParamMap {
    map.into_iter()
        .map(|(key, value)| (key, value.map_scalars(f)))
        .collect()
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Scalar(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Scalar(value)
    }
}

/// File chosen for an upload field. The file is referenced by path and never read here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl UploadedFile {
    pub fn new(path: impl Into<String>, content_type: Option<String>) -> Self {
        Self {
            path: path.into(),
            content_type,
        }
    }
}

#[cfg(test)]
#[path = "params_tests.rs"]
mod tests;
