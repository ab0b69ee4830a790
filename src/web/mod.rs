//! Axum glue: mount `ValidatedJson<T>` in handlers and return
//! `canonical_json` bodies. The host owns the router and the socket.

pub mod api_doc;
pub mod error;
pub mod extract;

pub use api_doc::ApiDoc;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use extract::{canonical_json, ValidatedJson};
