use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::error::AppError;

/// Terminal output of a pipeline: a status plus an optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Option<JsonValue>,
}

impl Reply {
    pub fn json(status: StatusCode, body: JsonValue) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            body: None,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Error envelope written for every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub message: String,
    pub data: JsonValue,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: JsonValue::Null,
        }
    }

    pub(crate) fn from_error(err: &AppError) -> Self {
        let message = match err {
            AppError::Persistence(_) if !cfg!(debug_assertions) => "internal server error",
            _ => err.message(),
        };
        Self::new(err.status(), message)
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        log_app_error(&self);
        ErrorResponse::from_error(&self).into_response()
    }
}

pub(crate) fn log_app_error(err: &AppError) {
    match err {
        AppError::Persistence(message) => tracing::error!(error = %message, "request failed"),
        _ => tracing::debug!(status = err.status().as_u16(), error = %err, "request rejected"),
    }
}
