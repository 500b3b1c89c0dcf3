//! Encode subcommand: replay actions against a form and print its parameters.

use std::path::Path;

use anyhow::{anyhow, Context};
use tracing::info;

use formwire_core::{
    select_options, EncodingProfile, FieldError, FieldKind, FormSession, NodeId, NodeTree,
};
use formwire_dom::Document;

use crate::cli::Action;

type Session = FormSession<Document>;

/// Handle `formwire encode`.
pub(crate) fn handle_encode(
    form_path: &Path,
    form_index: usize,
    profile: EncodingProfile,
    actions: &[Action],
) -> anyhow::Result<()> {
    let doc = Document::load(form_path)
        .with_context(|| format!("Failed to load form {}", form_path.display()))?;
    let mut session = FormSession::new(doc).with_profile(profile);

    let forms = session.forms();
    let form = *forms.get(form_index).ok_or_else(|| {
        anyhow!(
            "Form index {} out of range, document has {} forms",
            form_index,
            forms.len()
        )
    })?;

    for action in actions {
        apply(&mut session, form, action).with_context(|| format!("Action {:?} failed", action))?;
    }

    for submission in session.submitter().submissions() {
        info!("Form {} was submitted", submission.form);
        println!("# submitted form {}", submission.form);
        println!("{}", serde_json::to_string_pretty(&submission.params)?);
    }

    let params = session.encode_form(Some(form))?;
    println!("{}", serde_json::to_string_pretty(&params)?);
    Ok(())
}

fn apply(session: &mut Session, form: NodeId, action: &Action) -> anyhow::Result<()> {
    match action {
        Action::Set { name, value } => {
            let field = find(session, form, name, None)?;
            session.set(field, value)?;
        }
        Action::Unset { name } => {
            let field = find(session, form, name, None)?;
            session.unset(field)?;
        }
        Action::Check { name } => {
            let checkbox = find(session, form, name, Some(FieldKind::Checkbox))?;
            session.check(checkbox)?;
        }
        Action::Uncheck { name } => {
            let checkbox = find(session, form, name, Some(FieldKind::Checkbox))?;
            session.uncheck(checkbox)?;
        }
        Action::Choose { name, value } => {
            let radios = session.fields_named(Some(form), name, Some(FieldKind::Radio))?;
            let radio = radios
                .into_iter()
                .find(|node| session.tree().attribute(*node, "value") == Some(value.as_str()))
                .ok_or_else(|| FieldError::NotFound(format!("{}={}", name, value)))?;
            session.choose(radio)?;
        }
        Action::Select { name, option } => {
            let select = find(session, form, name, None)?;
            let options = select_options(session.tree(), select);
            let chosen = options
                .iter()
                .find(|candidate| candidate.text.trim() == option)
                .or_else(|| options.iter().find(|candidate| candidate.value == *option))
                .ok_or_else(|| FieldError::NotFound(format!("option '{}' of {}", option, name)))?;
            session.set(select, &chosen.value)?;
        }
        Action::Unselect { name, value } => {
            let select = find(session, form, name, Some(FieldKind::MultiSelect))?;
            if !session.unset_value(select, value)? {
                return Err(anyhow!("'{}' is not selected in {}", value, name));
            }
        }
        Action::Attach {
            name,
            path,
            content_type,
        } => {
            let file = find(session, form, name, Some(FieldKind::File))?;
            session.set_file(file, path, content_type.clone())?;
        }
        Action::Click { name, at } => {
            let button = session
                .fields_named(Some(form), name, None)?
                .into_iter()
                .find(|node| {
                    session
                        .cached_field(*node)
                        .is_some_and(|field| field.kind().is_clickable())
                })
                .ok_or_else(|| FieldError::NotFound(name.clone()))?;
            match at {
                Some((x, y)) => session.click_at(button, *x, *y)?,
                None => session.click(button)?,
            }
        }
    }
    Ok(())
}

/// First field of `form` named `name`, optionally of one kind.
fn find(
    session: &mut Session,
    form: NodeId,
    name: &str,
    kind: Option<FieldKind>,
) -> Result<NodeId, FieldError> {
    session
        .fields_named(Some(form), name, kind)?
        .into_iter()
        .next()
        .ok_or_else(|| FieldError::NotFound(name.to_string()))
}
