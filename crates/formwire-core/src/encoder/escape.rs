//! Value escaping.
//!
//! Values are percent-encoded before they are spliced into a `name=value` query
//! so `&` and `=` cannot split them. Parsing percent-decodes again; the final
//! pass below then decodes HTML entities left over from markup.

use url::form_urlencoded;

use formwire_protocols::{map_scalars_in, ParamMap, ParamValue};

/// Longest entity body we look at, e.g. `#x10FFFF`.
const MAX_ENTITY_LEN: usize = 10;

/// `application/x-www-form-urlencoded` escaping of a single value.
pub fn escape(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Escape the characters of a field name that would split or alter a query pair.
///
/// Bracket syntax is left alone so the nested parser still sees the path.
pub fn escape_key(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '+' => out.push_str("%2B"),
            _ => out.push(c),
        }
    }
    out
}

/// Decode `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;` and numeric character
/// references. Anything else is left untouched.
pub fn unescape_html(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match decode_entity(tail) {
            Some((ch, consumed)) => {
                out.push(ch);
                rest = &tail[consumed..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Decode the entity at the start of `s` (which begins with `&`), returning the
/// character and the number of bytes consumed including `&` and `;`.
fn decode_entity(s: &str) -> Option<(char, usize)> {
    let (semi, _) = s[1..]
        .char_indices()
        .take(MAX_ENTITY_LEN + 1)
        .find(|(_, c)| *c == ';')?;
    let body = &s[1..1 + semi];

    let ch = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        _ => {
            let number = body.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) if !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()?
                }
                Some(_) => return None,
                None if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) => {
                    number.parse().ok()?
                }
                None => return None,
            };
            char::from_u32(code)?
        }
    };
    Some((ch, semi + 2))
}

/// Decode every scalar leaf of `params`, keeping the tree shape.
pub fn unescape_params(params: ParamMap) -> ParamMap {
    map_scalars_in(params, &mut |value| ParamValue::Scalar(unescape_html(&value)))
}
