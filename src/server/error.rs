use axum::{
    extract::rejection::JsonRejection,
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    #[error("Recipe with id {0} not found.")]
    NotFound(i64),

    #[error("No route for {0} {1}")]
    RouteNotFound(Method, Uri),

    #[error("Method {0} is not allowed on {1}")]
    MethodNotAllowed(Method, Uri),

    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedPayload(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Validation(_) | ApiError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::RouteNotFound(..) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(..) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match &self {
            ApiError::Internal(e) => {
                tracing::error!("Request failed: {}", e);
                "Internal server error.".to_string()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
