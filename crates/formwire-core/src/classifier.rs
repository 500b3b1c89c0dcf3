//! Field kind classification.

use formwire_protocols::{FieldKind, NodeId, NodeTree};

/// Tags that are loaded as fields.
pub const CONTROL_TAGS: [&str; 4] = ["button", "input", "textarea", "select"];

/// Classify a control from its tag and attributes.
///
/// Total over every input: unknown tags are treated like `input`, and unknown or
/// missing `type` values fall through to [`FieldKind::Text`].
pub fn classify<'a, I>(tag_name: &str, attributes: I) -> FieldKind
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut type_attr = None;
    let mut multiple = false;
    for (name, value) in attributes {
        if name.eq_ignore_ascii_case("type") {
            type_attr = Some(value);
        } else if name.eq_ignore_ascii_case("multiple") {
            multiple = true;
        }
    }
    classify_parts(tag_name, type_attr, multiple)
}

/// Classify a node of `tree`. Returns `None` for tags that are not form controls.
pub fn classify_node(tree: &dyn NodeTree, node: NodeId) -> Option<FieldKind> {
    let tag = tree.tag_name(node)?;
    if !is_control_tag(tag) {
        return None;
    }
    Some(classify_parts(
        tag,
        tree.attribute(node, "type"),
        tree.has_attribute(node, "multiple"),
    ))
}

pub fn is_control_tag(tag: &str) -> bool {
    CONTROL_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

fn classify_parts(tag: &str, type_attr: Option<&str>, multiple: bool) -> FieldKind {
    if tag.eq_ignore_ascii_case("button") {
        return FieldKind::Button;
    }
    if tag.eq_ignore_ascii_case("select") {
        return if multiple {
            FieldKind::MultiSelect
        } else {
            FieldKind::Select
        };
    }
    if tag.eq_ignore_ascii_case("textarea") {
        return FieldKind::Textarea;
    }

    match type_attr.map(str::to_ascii_lowercase).as_deref() {
        Some("checkbox") => FieldKind::Checkbox,
        Some("hidden") => FieldKind::Hidden,
        Some("radio") => FieldKind::Radio,
        Some("password") => FieldKind::Password,
        Some("file") => FieldKind::File,
        Some("reset") => FieldKind::Reset,
        Some("submit") | Some("button") => FieldKind::Button,
        Some("image") => FieldKind::Image,
        _ => FieldKind::Text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(tag: &str, attrs: &[(&str, &str)]) -> FieldKind {
        classify(tag, attrs.iter().copied())
    }

    #[test]
    fn test_button_tag_ignores_type() {
        assert_eq!(kind("button", &[]), FieldKind::Button);
        assert_eq!(kind("button", &[("type", "reset")]), FieldKind::Button);
    }

    #[test]
    fn test_select_multiple() {
        assert_eq!(kind("select", &[]), FieldKind::Select);
        assert_eq!(kind("select", &[("multiple", "")]), FieldKind::MultiSelect);
        assert_eq!(
            kind("select", &[("multiple", "multiple")]),
            FieldKind::MultiSelect
        );
    }

    #[test]
    fn test_textarea() {
        assert_eq!(kind("textarea", &[("type", "checkbox")]), FieldKind::Textarea);
    }

    #[test]
    fn test_input_types() {
        let cases = [
            ("checkbox", FieldKind::Checkbox),
            ("hidden", FieldKind::Hidden),
            ("radio", FieldKind::Radio),
            ("password", FieldKind::Password),
            ("file", FieldKind::File),
            ("reset", FieldKind::Reset),
            ("submit", FieldKind::Button),
            ("button", FieldKind::Button),
            ("image", FieldKind::Image),
            ("text", FieldKind::Text),
            ("email", FieldKind::Text),
            ("bogus", FieldKind::Text),
        ];
        for (type_attr, expected) in cases {
            assert_eq!(kind("input", &[("type", type_attr)]), expected, "{type_attr}");
        }
    }

    #[test]
    fn test_missing_type_is_text() {
        assert_eq!(kind("input", &[("name", "q")]), FieldKind::Text);
    }

    #[test]
    fn test_other_tags_dispatch_on_type() {
        assert_eq!(kind("div", &[]), FieldKind::Text);
        assert_eq!(kind("div", &[("type", "radio")]), FieldKind::Radio);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(kind("SELECT", &[("MULTIPLE", "")]), FieldKind::MultiSelect);
        assert_eq!(kind("INPUT", &[("type", "CheckBox")]), FieldKind::Checkbox);
    }

    #[test]
    fn test_deterministic() {
        let attrs = [("type", "file"), ("name", "upload")];
        let first = kind("input", &attrs);
        for _ in 0..10 {
            assert_eq!(kind("input", &attrs), first);
        }
    }

    #[test]
    fn test_is_control_tag() {
        assert!(is_control_tag("input"));
        assert!(is_control_tag("TEXTAREA"));
        assert!(!is_control_tag("option"));
        assert!(!is_control_tag("form"));
    }
}
