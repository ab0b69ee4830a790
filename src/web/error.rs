use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::rpc::ErrorDescriptor;
use crate::schema::ValidationFailure;

#[derive(Debug)]
pub enum ApiError {
    /// Body is not a JSON document at all.
    Malformed(String),
    /// Incoming document failed its request contract.
    Validation(ValidationFailure),
    /// Outgoing document failed its result contract.
    Outgoing(ValidationFailure),
}

impl From<ValidationFailure> for ApiError {
    fn from(e: ValidationFailure) -> Self {
        ApiError::Validation(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Malformed(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("malformed_body", &msg)),
            )
                .into_response(),
            ApiError::Validation(failure) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse::from_failure("validation_failed", &failure)),
            )
                .into_response(),
            ApiError::Outgoing(failure) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::from_failure("invalid_result", &failure)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ErrorDescriptor>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
            errors: Vec::new(),
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            message: Some(message.to_string()),
            ..Self::new(error)
        }
    }

    pub fn from_failure(error: &str, failure: &ValidationFailure) -> Self {
        ErrorResponse {
            message: Some(failure.to_string()),
            errors: failure.descriptors(),
            ..Self::new(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldError, FieldPath, Violation};
    use serde_json::json;

    fn failure() -> ValidationFailure {
        ValidationFailure {
            schema: "SbisRequest",
            errors: vec![FieldError::new(
                FieldPath::root().key("stretch_id"),
                Violation::Missing,
                None,
            )],
        }
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Malformed("eof".into()).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(failure()).into_response().status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Outgoing(failure()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_response_body() {
        let body = serde_json::to_value(ErrorResponse::from_failure("validation_failed", &failure())).unwrap();
        assert_eq!(body["error"], json!("validation_failed"));
        assert_eq!(
            body["errors"],
            json!([{"field": "stretch_id", "message": "field required"}])
        );

        let body = serde_json::to_value(ErrorResponse::new("malformed_body")).unwrap();
        assert_eq!(body, json!({"error": "malformed_body"}));
    }
}
