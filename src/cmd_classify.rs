//! Classify subcommand: list every control of a document.

use std::path::Path;

use anyhow::Context;

use formwire_core::{FormSession, NodeTree, CONTROL_TAGS};
use formwire_dom::Document;

/// Handle `formwire classify`.
pub(crate) fn handle_classify(form_path: &Path) -> anyhow::Result<()> {
    let doc = Document::load(form_path)
        .with_context(|| format!("Failed to load form {}", form_path.display()))?;
    let mut session = FormSession::new(doc);

    let root = session.tree().root();
    let controls = session.tree().descendants_by_tag(root, &CONTROL_TAGS);
    if controls.is_empty() {
        println!("No form controls found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<12} {:<30} {:<30} {}",
        "NODE", "KIND", "NAME", "VALUE", "LABEL"
    );
    println!("{}", "-".repeat(100));
    for node in controls {
        let label = session.label_text(node)?.unwrap_or_default();
        let field = session.field(node)?;
        let value = serde_json::to_string(field.value())?;
        let disabled = if field.is_disabled() { " (disabled)" } else { "" };
        println!(
            "{:<6} {:<12} {:<30} {:<30} {}{}",
            node.to_string(),
            field.kind().as_str(),
            field.name().unwrap_or("-"),
            value,
            label,
            disabled
        );
    }
    Ok(())
}
