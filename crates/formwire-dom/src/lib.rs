//! In-memory element tree for formwire.
//!
//! [`Document`] is a flat arena of elements addressed by [`NodeId`]. It is built
//! either programmatically or from an [`ElementSpec`] description (usually JSON),
//! and implements [`NodeTree`] so form fields can be read from it.
//!
//! ```text
//! ElementSpec (JSON) ──► Document (arena) ──► NodeTree ──► formwire-core
//! ```

mod document;
mod error;
mod spec;

pub use document::Document;
pub use error::DomError;
pub use spec::ElementSpec;

pub use formwire_protocols::{NodeId, NodeTree};
