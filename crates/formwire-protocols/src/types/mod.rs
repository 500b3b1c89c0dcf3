//! Common types shared across formwire crates.

mod kind;
mod label;
mod params;

pub use kind::*;
pub use label::*;
pub use params::*;
