//! Bracket-key path parsing.
//!
//! `user[tags][]=a` names a path: descend into mapping `user`, then into array
//! `tags`, then append. Insertion reuses existing containers when their shape
//! matches; a container of the wrong shape is replaced.

use tracing::{trace, warn};
use url::form_urlencoded;

use formwire_protocols::{ParamMap, ParamValue};

/// Parse a nested query string such as `a[b][]=x&a[b][]=y`.
pub fn parse_nested_query(query: &str) -> ParamMap {
    let mut params = ParamMap::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        insert_path(&mut params, &key, ParamValue::Scalar(value.into_owned()));
    }
    params
}

/// Insert `value` into `params` at the bracket path `name`.
///
/// Names without a leading identifier (`[]`, `=x`) are dropped.
pub fn insert_path(params: &mut ParamMap, name: &str, value: ParamValue) {
    let (key, after) = split_head(name);
    if key.is_empty() {
        trace!(name, "Dropping parameter without a key");
        return;
    }
    trace!(key, after, "Inserting parameter");

    if after.is_empty() {
        params.insert(key.to_string(), value);
    } else if after == "[" {
        params.insert(name.to_string(), value);
    } else if after == "[]" {
        array_at(params, key).push(value);
    } else if let Some(rest) = after.strip_prefix("[]") {
        let child = child_key(rest);
        let items = array_at(params, key);
        match items.last_mut() {
            Some(ParamValue::Map(last)) if !has_path(last, child) => {
                insert_path(last, child, value);
            }
            _ => {
                let mut entry = ParamMap::new();
                insert_path(&mut entry, child, value);
                items.push(ParamValue::Map(entry));
            }
        }
    } else {
        insert_path(map_at(params, key), after, value);
    }
}

/// Split `name` into its leading key and the bracket groups that follow.
///
/// Leading brackets are skipped and closing brackets after the key are eaten,
/// so `a[b][c]` becomes `("a", "[b][c]")` and `[b][c]` becomes `("b", "[c]")`.
fn split_head(name: &str) -> (&str, &str) {
    let start = name
        .find(|c: char| c != '[' && c != ']')
        .unwrap_or(name.len());
    let rest = &name[start..];
    let key_len = rest.find(['[', ']']).unwrap_or(rest.len());
    let after = rest[key_len..].trim_start_matches(']');
    (&rest[..key_len], after)
}

/// The path below an array entry: `[x]` yields `x`, longer paths are kept whole.
fn child_key(rest: &str) -> &str {
    rest.strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .filter(|inner| !inner.is_empty() && !inner.contains(['[', ']']))
        .unwrap_or(rest)
}

/// Whether every key segment of `path` already exists in `map`.
fn has_path(map: &ParamMap, path: &str) -> bool {
    if path.contains("[]") {
        return false;
    }
    let mut current = map;
    let mut segments = path.split(['[', ']']).filter(|s| !s.is_empty()).peekable();
    while let Some(segment) = segments.next() {
        let Some(next) = current.get(segment) else {
            return false;
        };
        if segments.peek().is_none() {
            return true;
        }
        match next {
            ParamValue::Map(inner) => current = inner,
            _ => return false,
        }
    }
    true
}

fn array_at<'a>(params: &'a mut ParamMap, key: &str) -> &'a mut Vec<ParamValue> {
    let slot = params
        .entry(key.to_string())
        .or_insert_with(|| ParamValue::Array(Vec::new()));
    if !matches!(slot, ParamValue::Array(_)) {
        warn!(key, "Expected an array parameter, replacing existing value");
        *slot = ParamValue::Array(Vec::new());
    }
    match slot {
        ParamValue::Array(items) => items,
        _ => unreachable!("slot holds an array"),
    }
}

fn map_at<'a>(params: &'a mut ParamMap, key: &str) -> &'a mut ParamMap {
    let slot = params
        .entry(key.to_string())
        .or_insert_with(|| ParamValue::Map(ParamMap::new()));
    if !matches!(slot, ParamValue::Map(_)) {
        warn!(key, "Expected a mapping parameter, replacing existing value");
        *slot = ParamValue::Map(ParamMap::new());
    }
    match slot {
        ParamValue::Map(map) => map,
        _ => unreachable!("slot holds a mapping"),
    }
}

#[cfg(test)]
#[path = "nested_tests.rs"]
mod tests;
