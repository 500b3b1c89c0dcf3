//! Error types for the formwire protocol layer.

mod field;

pub use field::*;
