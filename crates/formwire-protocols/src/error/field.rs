//! Field interaction errors.

use thiserror::Error;

use crate::{FieldKind, NodeId};

pub type FieldResult<T> = Result<T, FieldError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Cannot interact with disabled form element: {0}")]
    DisabledField(String),

    #[error("Node {0} is not a form field")]
    UnknownField(NodeId),

    #[error("Cannot {action} a {actual} field")]
    WrongKind {
        action: &'static str,
        actual: FieldKind,
    },

    #[error("Field not found: {0}")]
    NotFound(String),
}
