//! End-to-end form scenarios: JSON markup in, submitted parameters out.

use formwire_core::{EncodingProfile, FieldValue, FormSession, NodeTree};
use formwire_dom::Document;
use serde_json::{json, Value};

const SIGNUP: &str = r#"{
  "tag": "form",
  "attrs": {"action": "/signup", "method": "post"},
  "children": [
    {"tag": "input", "attrs": {"type": "hidden", "name": "authenticity_token", "value": "abc&amp;123"}},
    {"tag": "label", "attrs": {"for": "user_name"}, "text": "Name"},
    {"tag": "input", "attrs": {"type": "text", "name": "user[name]", "id": "user_name"}},
    {"tag": "input", "attrs": {"type": "password", "name": "user[password]"}},
    {"tag": "textarea", "attrs": {"name": "user[bio]"}, "text": "Hello"},
    {"tag": "input", "attrs": {"type": "hidden", "name": "user[newsletter]", "value": "0"}},
    {"tag": "input", "attrs": {"type": "checkbox", "name": "user[newsletter]", "value": "1"}},
    {"tag": "input", "attrs": {"type": "radio", "name": "user[plan]", "value": "free", "checked": "checked"}},
    {"tag": "input", "attrs": {"type": "radio", "name": "user[plan]", "value": "pro"}},
    {"tag": "select", "attrs": {"name": "user[country]"}, "children": [
      {"tag": "option", "attrs": {"value": "nl"}, "text": "Netherlands"},
      {"tag": "option", "attrs": {"value": "de", "selected": "selected"}, "text": "Germany"}
    ]},
    {"tag": "select", "attrs": {"name": "user[langs][]", "multiple": "multiple"}, "children": [
      {"tag": "option", "attrs": {"value": "rust"}, "text": "Rust"},
      {"tag": "option", "attrs": {"value": "go"}, "text": "Go"}
    ]},
    {"tag": "input", "attrs": {"type": "hidden", "name": "user[role_ids][]", "value": "1"}},
    {"tag": "input", "attrs": {"type": "hidden", "name": "user[role_ids][]", "value": "2"}},
    {"tag": "input", "attrs": {"type": "text", "name": "user[nickname]", "value": "ignored", "disabled": "disabled"}},
    {"tag": "input", "attrs": {"type": "file", "name": "user[avatar]"}},
    {"tag": "input", "attrs": {"type": "submit", "name": "commit", "value": "Sign up"}}
  ]
}"#;

fn signup() -> FormSession<Document> {
    FormSession::new(Document::from_json(SIGNUP).unwrap())
}

fn submitted(session: &FormSession<Document>) -> Value {
    let submission = session.submitter().last().expect("form was submitted");
    serde_json::to_value(&submission.params).unwrap()
}

#[test]
fn test_untouched_form_submits_defaults() {
    let mut session = signup();
    let commit = session.field_named("commit").unwrap();
    session.click(commit).unwrap();

    assert_eq!(
        submitted(&session),
        json!({
            "authenticity_token": "abc&123",
            "user": {
                "name": "",
                "password": "",
                "bio": "Hello",
                "newsletter": "0",
                "plan": "free",
                "country": "de",
                "role_ids": ["1", "2"],
                "avatar": ""
            },
            "commit": "Sign up"
        })
    );
}

#[test]
fn test_filled_form_submits_user_values() {
    let mut session = signup();

    let name = session.field_labeled("Name").unwrap();
    session.set(name, "Ada").unwrap();
    let password = session.field_named("user[password]").unwrap();
    session.set(password, "s3cret & safe").unwrap();
    let form = session.tree().root();
    let newsletter = session
        .fields_named(Some(form), "user[newsletter]", None)
        .unwrap()[1];
    session.check(newsletter).unwrap();
    let pro = session.field_named_with_value("user[plan]", "pro").unwrap();
    session.choose(pro).unwrap();
    let langs = session.field_named("user[langs][]").unwrap();
    session.set(langs, "rust").unwrap();
    session.set(langs, "go").unwrap();
    let avatar = session.field_named("user[avatar]").unwrap();
    session
        .set_file(avatar, "/tmp/ada.png", Some("image/png".to_string()))
        .unwrap();

    let commit = session.field_named("commit").unwrap();
    session.click(commit).unwrap();

    assert_eq!(
        submitted(&session),
        json!({
            "authenticity_token": "abc&123",
            "user": {
                "name": "Ada",
                "password": "s3cret & safe",
                "bio": "Hello",
                "newsletter": "1",
                "plan": "pro",
                "country": "de",
                "langs": ["rust", "go"],
                "role_ids": ["1", "2"],
                "avatar": {"path": "/tmp/ada.png", "content_type": "image/png"}
            },
            "commit": "Sign up"
        })
    );
}

#[test]
fn test_round_trip_and_unset() {
    let mut session = signup();
    let bio = session.field_named("user[bio]").unwrap();

    session.set(bio, "Changed").unwrap();
    assert_eq!(session.value(bio).unwrap(), FieldValue::single("Changed"));

    session.unset(bio).unwrap();
    assert_eq!(session.value(bio).unwrap(), FieldValue::single("Hello"));
}

#[test]
fn test_flat_profile_submission() {
    let mut session = signup().with_profile(EncodingProfile::Flat);
    let commit = session.field_named("commit").unwrap();
    session.click(commit).unwrap();

    let params = submitted(&session);
    assert_eq!(params["user[role_ids][]"], json!(["1", "2"]));
    assert_eq!(params["user[country]"], json!(["de"]));
    assert_eq!(params["user[newsletter]"], json!(["0"]));
    assert!(params.get("user[nickname]").is_none());
}
