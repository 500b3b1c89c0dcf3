//! # Formwire Protocols
//!
//! Collaborator interfaces and shared data types for formwire.
//! Contains only definitions - field behavior lives in `formwire-core`.
//!
//! ## Core Traits
//!
//! - [`NodeTree`] - Read-only view of the document that holds the form controls
//! - [`FormSubmitter`] - Receives the encoded parameters when a form is submitted

pub mod error;
pub mod node;
pub mod submit;
pub mod types;

pub use error::{FieldError, FieldResult};
pub use node::{NodeId, NodeTree};
pub use submit::{FormSubmitter, RecordingSubmitter, Submission};
pub use types::*;
