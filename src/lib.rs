//! Data contracts and normalization rules for the ballistics service.
//!
//! Every value that crosses the service boundary goes through
//! [`schema::Engine`]: it is checked against the static descriptor of its
//! contract type, rounded to the configured [`precision::Precision`], and
//! only then decoded into the typed entity.

/// Binds a contract type to its static descriptor.
macro_rules! contract {
    ($ty:ty => $def:expr) => {
        impl $crate::schema::Schema for $ty {
            fn schema() -> &'static $crate::schema::SchemaDef {
                &$def
            }
        }
    };
}

pub mod config;
pub mod model;
pub mod normalize;
pub mod precision;
pub mod rpc;
pub mod schema;
pub mod web;

pub use precision::{Policy, Precision};
pub use schema::{Engine, Schema, ValidationFailure};
