//! Circuit description and validation.
//!
//! This module provides the representation of a generated circuit instance.
//! The [`CircuitSpec`] struct holds the topology together with exactly the
//! component values that topology needs, in a form suitable for analysis.

mod spec;
mod types;
mod validate;

pub use spec::CircuitSpec;
pub use types::*;
pub use validate::validate_spec;
