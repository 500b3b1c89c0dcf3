//! Document construction errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomError {
    #[error("Invalid element spec: {0}")]
    InvalidSpec(String),

    #[error("Unknown node: {0}")]
    UnknownNode(formwire_protocols::NodeId),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
