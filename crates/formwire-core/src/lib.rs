//! Form field model and request parameter encoding.
//!
//! Controls found in a [`NodeTree`] are classified into a [`FieldKind`], wrapped in
//! a memoized [`Field`] by a [`FormSession`], mutated through the value
//! lifecycle and finally encoded into a nested [`ParamMap`] for submission.

pub mod classifier;
pub mod coordinator;
pub mod encoder;
mod field;
mod lifecycle;
mod options;
mod session;

pub use classifier::{classify, classify_node, is_control_tag, CONTROL_TAGS};
pub use encoder::{encode_field, encode_fields, merge_params};
pub use field::{ClickPoint, Field, FieldValue, Lifecycle};
pub use lifecycle::{default_value, CHECKED_FALLBACK};
pub use options::{select_options, SelectOption};
pub use session::FormSession;

pub use formwire_config::EncodingProfile;
pub use formwire_protocols::{
    FieldError, FieldKind, FieldResult, FormSubmitter, Label, NodeId, NodeTree, ParamMap,
    ParamValue, RecordingSubmitter, Submission, UploadedFile,
};
