//! Validation engine and the static descriptors it walks.

mod descriptor;
mod engine;
mod error;

pub use descriptor::{
    Constraint, FieldDef, Kind, Normalizer, Presence, Role, Schema, SchemaDef, ERRORS_FIELD,
    ERROR_DESCRIPTOR, TOKEN_FIELD,
};
pub use engine::Engine;
pub use error::{FieldError, FieldPath, Segment, ValidationFailure, Violation};
