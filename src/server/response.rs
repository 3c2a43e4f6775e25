use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::Error;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }
}

/// API error that converts to a proper HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::FORBIDDEN,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

/// The one place where domain errors become status codes.
impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        match e {
            Error::Unauthenticated(reason) => {
                tracing::warn!("Authentication failed: {reason}");
                ApiError::unauthorized("Invalid token")
            }
            Error::Forbidden(msg) => ApiError::forbidden(msg),
            Error::NotFound => ApiError::not_found("Not found"),
            Error::AlreadyExists => ApiError::conflict("Already exists"),
            Error::InvalidTransition { from, to } => {
                ApiError::conflict(format!("Cannot change task status from {from} to {to}"))
            }
            Error::BadRequest(msg) => ApiError::bad_request(msg),
            other => {
                tracing::error!("Request failed: {other}");
                ApiError::internal("Internal server error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "data": null, "error": self.message });
        let mut response = (self.status, Json(body)).into_response();

        if self.status == StatusCode::UNAUTHORIZED {
            response.headers_mut().insert(
                WWW_AUTHENTICATE,
                HeaderValue::from_static("Bearer realm=\"porch\""),
            );
        }

        response
    }
}

/// Extension trait for converting store results to API errors with a custom
/// message for the cases a handler wants to word itself.
pub trait StoreResultExt<T> {
    fn or_not_found(self, message: impl Into<String>) -> Result<T, ApiError>;
    fn or_conflict(self, message: impl Into<String>) -> Result<T, ApiError>;
}

impl<T> StoreResultExt<T> for crate::error::Result<T> {
    fn or_not_found(self, message: impl Into<String>) -> Result<T, ApiError> {
        self.map_err(|e| match e {
            Error::NotFound => ApiError::not_found(message),
            other => ApiError::from(other),
        })
    }

    fn or_conflict(self, message: impl Into<String>) -> Result<T, ApiError> {
        self.map_err(|e| match e {
            Error::AlreadyExists => ApiError::conflict(message),
            other => ApiError::from(other),
        })
    }
}

/// Extension for Option types from store operations.
pub trait StoreOptionExt<T> {
    fn or_not_found(self, message: impl Into<String>) -> Result<T, ApiError>;
}

impl<T> StoreOptionExt<T> for Option<T> {
    fn or_not_found(self, message: impl Into<String>) -> Result<T, ApiError> {
        self.ok_or_else(|| ApiError::not_found(message))
    }
}
