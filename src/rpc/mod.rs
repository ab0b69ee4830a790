//! RPC surface: request/result envelope pairs and the operation catalogue.

mod catalogue;
mod contracts;
mod envelope;

pub use catalogue::{Operation, Rpc};
pub use contracts::*;
pub use envelope::{ErrorDescriptor, ResultEnvelope, Status};
