use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::schema::{Schema, ValidationFailure};

/// One entry of a result's `errors` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDescriptor {
    /// Path of the offending field, or an operation-level key.
    pub field: String,
    pub message: String,
}

impl ErrorDescriptor {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Outcome reported by operations that have no other payload.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, EnumString, AsRefStr, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Status {
    Passed,
    #[default]
    Failed,
}

impl Status {
    /// Wire literals, in declaration order.
    pub const WIRE: &'static [&'static str] = &["passed", "failed"];
}

/// Common behaviour of every result document.
pub trait ResultEnvelope: Schema {
    fn errors(&self) -> &[ErrorDescriptor];

    /// A failed result: payload left empty, status (if any) `failed`.
    fn from_errors(errors: Vec<ErrorDescriptor>) -> Self;

    fn from_failure(failure: &ValidationFailure) -> Self
    where
        Self: Sized,
    {
        Self::from_errors(failure.descriptors())
    }

    fn is_success(&self) -> bool {
        self.errors().is_empty()
    }
}

/// Implements `ResultEnvelope` for a result struct whose payload fields all
/// have a failed/empty `Default`.
macro_rules! envelope {
    ($ty:ident { $($payload:ident),* $(,)? }) => {
        impl $crate::rpc::ResultEnvelope for $ty {
            fn errors(&self) -> &[$crate::rpc::ErrorDescriptor] {
                self.errors.as_deref().unwrap_or_default()
            }

            fn from_errors(errors: Vec<$crate::rpc::ErrorDescriptor>) -> Self {
                Self {
                    $($payload: Default::default(),)*
                    errors: Some(errors),
                }
            }
        }
    };
}

pub(crate) use envelope;
