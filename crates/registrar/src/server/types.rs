use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::error::PortalError;

/// JSON error body returned by every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiErrorType {
    #[serde(skip)]
    status: StatusCode,
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<String>,
}

impl From<(StatusCode, &str, Option<String>)> for ApiErrorType {
    fn from((status, error, context): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            error: error.to_string(),
            context,
        }
    }
}

impl From<PortalError> for ApiErrorType {
    fn from(err: PortalError) -> Self {
        let (status, message) = match &err {
            PortalError::InvalidCredentials => (StatusCode::UNAUTHORIZED, "Invalid credentials"),
            PortalError::UserAlreadyExists { .. } => (StatusCode::CONFLICT, "User already exists"),
            PortalError::Network { .. }
            | PortalError::Remote { .. }
            | PortalError::RemoteUnavailable => {
                (StatusCode::BAD_GATEWAY, "Remote backend request failed")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Request failed"),
        };

        (status, message, Some(err.to_string())).into()
    }
}

impl IntoResponse for ApiErrorType {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
