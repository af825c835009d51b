//! Error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::ApiError;
use crate::util::ValidationError;

/// Failure of a request, rendered as JSON.
#[derive(Debug)]
pub enum HttpError {
    NotFound(String),
    Validation(ValidationError),
    Internal(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl HttpError {
    pub fn not_found(what: impl Into<String>) -> Self {
        HttpError::NotFound(what.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for HttpError {
    fn from(e: ValidationError) -> Self {
        HttpError::Validation(e)
    }
}

impl From<ApiError> for HttpError {
    fn from(e: ApiError) -> Self {
        HttpError::Internal(e.to_string())
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            HttpError::NotFound(what) => ErrorBody {
                error: "not_found",
                message: format!("{} not found", what),
                field: None,
            },
            HttpError::Validation(e) => ErrorBody {
                error: "validation_error",
                message: e.to_string(),
                field: Some(e.field()),
            },
            HttpError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                ErrorBody {
                    error: "internal_error",
                    message,
                    field: None,
                }
            }
        };
        (status, Json(body)).into_response()
    }
}
