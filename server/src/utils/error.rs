//! Unified error type for the storefront server
//!
//! Every fallible operation funnels into [`AppError`], which carries the
//! error taxonomy the API exposes:
//!
//! - `Validation` — malformed or out-of-range input, rejected before persistence
//! - `NotFound` — referenced order/product/identity does not exist
//! - `Conflict` — resource already exists
//! - `Upstream` — the messaging platform call failed or timed out;
//!   persisted state is never rolled back because of it
//! - `Configuration` — required credentials/environment missing
//! - `Database` / `Internal` — infrastructure failures

use axum::Json;
use axum::response::IntoResponse;
use http::StatusCode;
use thiserror::Error;

/// Application error with an HTTP status mapping
#[derive(Debug, Error)]
pub enum AppError {
    /// Validation error (400)
    #[error("{message}")]
    Validation { message: String },

    /// Resource not found (404)
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Resource already exists (409)
    #[error("{message}")]
    Conflict { message: String },

    /// Upstream delivery failure — messaging platform unreachable or timed out (502)
    #[error("Upstream delivery failed: {message}")]
    Upstream { message: String },

    /// Required configuration missing (500)
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Database error (500)
    #[error("Database error: {message}")]
    Database { message: String },

    /// Internal server error (500)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::Configuration { .. } | Self::Database { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, "{message}");
        }

        let body = AppResponse::<()>::error(message);
        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type AppResult<T> = Result<T, AppError>;

/// API response envelope
///
/// Matches the wire format the storefront and admin clients expect:
/// `{ "success": bool, "data": ..., "error": ... }`.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> AppResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}
