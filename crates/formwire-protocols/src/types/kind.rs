//! Field kind tags.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of field kinds. Each kind selects one set of default-value,
/// mutation and encoding rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Button,
    Image,
    Hidden,
    Checkbox,
    Password,
    Radio,
    Textarea,
    File,
    Text,
    Reset,
    Select,
    MultiSelect,
}

impl FieldKind {
    pub const ALL: [FieldKind; 12] = [
        FieldKind::Button,
        FieldKind::Image,
        FieldKind::Hidden,
        FieldKind::Checkbox,
        FieldKind::Password,
        FieldKind::Radio,
        FieldKind::Textarea,
        FieldKind::File,
        FieldKind::Text,
        FieldKind::Reset,
        FieldKind::Select,
        FieldKind::MultiSelect,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Button => "button",
            FieldKind::Image => "image",
            FieldKind::Hidden => "hidden",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Password => "password",
            FieldKind::Radio => "radio",
            FieldKind::Textarea => "textarea",
            FieldKind::File => "file",
            FieldKind::Text => "text",
            FieldKind::Reset => "reset",
            FieldKind::Select => "select",
            FieldKind::MultiSelect => "multi_select",
        }
    }

    /// Kinds that hold no value until clicked.
    pub fn is_clickable(&self) -> bool {
        matches!(self, FieldKind::Button | FieldKind::Image | FieldKind::Reset)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
