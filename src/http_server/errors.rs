//! Error responses
//!
//! Every failure leaves the server as `{"message": ...}` with a status
//! code. Filter failures also carry the zero-based `filter` index and a
//! `detail` string naming the offending fragment.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::AuthError;
use crate::dataset::StoreError;
use crate::executor::ExecutorError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// A status code plus the JSON body sent with it
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorResponse {
                message: message.into(),
                filter: None,
                detail: None,
            },
        }
    }

    pub fn timeout() -> Self {
        Self::new(StatusCode::GATEWAY_TIMEOUT, "Request timed out")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn message(&self) -> &str {
        &self.body.message
    }
}

impl From<ExecutorError> for ApiError {
    fn from(err: ExecutorError) -> Self {
        match err {
            ExecutorError::NotFound(_) | ExecutorError::Dataset(StoreError::NotFound(_)) => {
                Self::new(StatusCode::NOT_FOUND, "File not found")
            }
            ExecutorError::EmptyFile(_) | ExecutorError::Dataset(StoreError::EmptyFile(_)) => {
                Self::new(StatusCode::BAD_REQUEST, "File is empty")
            }
            ExecutorError::InvalidExpression { index, reason, .. } => {
                let mut api = Self::new(StatusCode::BAD_REQUEST, "Invalid filter expression");
                api.body.filter = Some(index);
                api.body.detail = Some(reason.to_string());
                api
            }
            ExecutorError::InvalidSortKey(column) => {
                let mut api =
                    Self::new(StatusCode::BAD_REQUEST, "Invalid column name for sorting");
                api.body.detail = Some(column);
                api
            }
            ExecutorError::Dataset(StoreError::Malformed { .. }) => {
                Self::new(StatusCode::BAD_REQUEST, "File is malformed")
            }
            ExecutorError::Dataset(StoreError::TooLarge { .. }) => {
                Self::new(StatusCode::PAYLOAD_TOO_LARGE, "File is too large")
            }
            ExecutorError::Dataset(StoreError::Unreadable { .. }) => {
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "File could not be read")
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        let status = StatusCode::from_u16(err.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
