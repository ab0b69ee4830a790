use axum::{
    extract::{FromRef, FromRequest, Request},
    Json,
};
use serde_json::Value;
use std::sync::Arc;

use super::error::{ApiError, ApiResult};
use crate::schema::{Engine, Schema};

/// JSON body that has passed its contract and been normalized.
///
/// The engine is taken from the router state, so the host only needs
/// `Arc<Engine>: FromRef<S>`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: Schema + Send,
    S: Send + Sync,
    Arc<Engine>: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let engine = Arc::<Engine>::from_ref(state);

        let Json(raw) = Json::<Value>::from_request(req, state).await.map_err(|e| {
            log::debug!("Rejected malformed body: {}", e.body_text());
            ApiError::Malformed(e.body_text())
        })?;

        let value = engine.validate::<T>(&raw).map_err(|failure| {
            log::debug!("Rejected request: {}", failure);
            ApiError::Validation(failure)
        })?;

        Ok(ValidatedJson(value))
    }
}

/// Runs an outgoing value through its result contract and returns the
/// canonical body.
pub fn canonical_json<T: Schema>(engine: &Engine, value: &T) -> ApiResult<Json<Value>> {
    engine.emit(value).map(Json).map_err(|failure| {
        log::warn!("Refusing to send invalid {}: {}", failure.schema, failure);
        ApiError::Outgoing(failure)
    })
}
