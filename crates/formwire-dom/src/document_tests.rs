use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn login_form() -> ElementSpec {
    ElementSpec::new("form").attr("action", "/login").children([
        ElementSpec::new("label")
            .text("Email ")
            .child(ElementSpec::input("text", "email").attr("id", "email")),
        ElementSpec::input("password", "password"),
        ElementSpec::new("select").attr("name", "role").children([
            ElementSpec::new("option").attr("value", "admin").text("Admin"),
            ElementSpec::new("option").text("User"),
        ]),
    ])
}

#[test]
fn test_from_spec_assigns_ids_in_document_order() {
    let doc = Document::from_spec(&login_form()).unwrap();
    assert_eq!(doc.len(), 7);
    assert_eq!(doc.tag_name(NodeId(0)), Some("form"));
    assert_eq!(doc.tag_name(NodeId(1)), Some("label"));
    assert_eq!(doc.tag_name(NodeId(2)), Some("input"));
    assert_eq!(doc.parent(NodeId(2)), Some(NodeId(1)));
}

#[test]
fn test_attributes() {
    let doc = Document::from_spec(&login_form()).unwrap();
    assert_eq!(doc.attribute(NodeId(2), "id"), Some("email"));
    assert_eq!(doc.attribute(NodeId(2), "value"), None);
    assert!(doc.has_attribute(NodeId(0), "action"));
}

#[test]
fn test_inner_text_includes_descendants() {
    let doc = Document::from_spec(&login_form()).unwrap();
    let select = doc.find_first("select", "name", "role").unwrap();
    assert_eq!(doc.inner_text(select), "AdminUser");
    assert_eq!(doc.inner_text(NodeId(1)), "Email ");
}

#[test]
fn test_tags_are_lowercased() {
    let doc = Document::from_spec(&ElementSpec::new("FORM").child(ElementSpec::new("Input")))
        .unwrap();
    assert_eq!(doc.tag_name(NodeId(0)), Some("form"));
    assert_eq!(doc.tag_name(NodeId(1)), Some("input"));
}

#[test]
fn test_append_element() {
    let mut doc = Document::new("html");
    let form = doc.append_element(doc.root(), "form", &[]).unwrap();
    let input = doc
        .append_element(form, "input", &[("type", "hidden"), ("name", "token")])
        .unwrap();

    assert_eq!(doc.children(form), &[input]);
    assert_eq!(doc.find_first("input", "name", "token"), Some(input));
    assert_eq!(doc.find_ancestor_by_tag(input, "form"), Some(form));
}

#[test]
fn test_append_to_unknown_parent() {
    let mut doc = Document::new("html");
    let result = doc.append_element(NodeId(42), "input", &[]);
    assert!(matches!(result, Err(DomError::UnknownNode(NodeId(42)))));
}

#[test]
fn test_empty_tag_rejected() {
    let result = Document::from_spec(&ElementSpec::new("form").child(ElementSpec::new(" ")));
    assert!(matches!(result, Err(DomError::InvalidSpec(_))));
}

#[test]
fn test_from_json_and_load() {
    let json = serde_json::to_string(&login_form()).unwrap();
    let doc = Document::from_json(&json).unwrap();
    assert_eq!(doc.len(), 7);

    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", json).unwrap();
    let loaded = Document::load(file.path()).unwrap();
    assert_eq!(loaded.len(), 7);
}

#[test]
fn test_from_json_rejects_garbage() {
    assert!(matches!(Document::from_json("[1, 2"), Err(DomError::Json(_))));
}
