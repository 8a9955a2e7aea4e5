//! Application error type shared by services, the upstream client and handlers.
//!
//! Every failure the site can hit (bad form input, unknown guest code,
//! expired admin token, an upstream API that answers with an error or not at
//! all) is expressed as an [`AppError`]. Handlers usually catch errors at the
//! call site and re-render the current page with an error banner; anything
//! that bubbles up is converted by the [`IntoResponse`] impl below.

use axum::{
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

use crate::web::handlers::ErrorPageTemplate;
use crate::web::middleware::admin_auth::{LOGIN_PATH, clear_session_cookie};

/// Machine-readable error summary, used in logs and JSON responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed user input.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Unknown guest code, UUID or guest id.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Duplicate guest code or a state change that is no longer allowed.
    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// Missing, invalid or expired admin token.
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// The upstream API answered with a non-success status.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: Value,
    },

    /// The upstream API could not be reached.
    #[error("{message}")]
    Unavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn upstream(status: u16, message: impl Into<String>, details: Value) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Short stable identifier of the error kind.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::Conflict { .. } => "conflict",
            AppError::Unauthorized { .. } => "unauthorized",
            AppError::Upstream { .. } => "upstream_error",
            AppError::Unavailable { .. } => "upstream_unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// HTTP status the site answers with when this error reaches a response.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Upstream { .. } | AppError::Unavailable { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::Conflict { details, .. }
            | AppError::Unauthorized { details, .. }
            | AppError::Upstream { details, .. }
            | AppError::Unavailable { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }

    /// The `detail` message the upstream API attached to its error body, if any.
    pub fn upstream_detail(&self) -> Option<&str> {
        self.details().get("detail").and_then(Value::as_str)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AppError::Unauthorized { .. })
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            code: self.code(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::bad_request("Form validation failed", details)
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return AppError::upstream(
                status.as_u16(),
                "Upstream API returned an error",
                json!({ "status": status.as_u16() }),
            );
        }

        if e.is_decode() {
            return AppError::internal(
                "Unexpected response from upstream API",
                json!({ "reason": e.to_string() }),
            );
        }

        AppError::unavailable(
            "Upstream API is unreachable",
            json!({ "reason": e.to_string() }),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_unauthorized() {
            tracing::info!(details = %self.details(), "Admin session rejected, forcing logout");
            return (
                [(SET_COOKIE, clear_session_cookie())],
                Redirect::to(&format!("{LOGIN_PATH}?expired=1")),
            )
                .into_response();
        }

        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, code = self.code(), details = %self.details(), "Request failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "Request rejected");
        }

        (status, ErrorPageTemplate::from_error(&self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::bad_request("x", json!({})).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::not_found("x", json!({})).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::upstream(500, "x", json!({})).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::unavailable("x", json!({})).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_upstream_detail() {
        let err = AppError::upstream(400, "x", json!({ "detail": "El código ya existe" }));
        assert_eq!(err.upstream_detail(), Some("El código ya existe"));

        let err = AppError::internal("x", json!({}));
        assert_eq!(err.upstream_detail(), None);
    }

    #[test]
    fn test_unauthorized_redirects_to_login_and_clears_cookie() {
        let response = AppError::unauthorized("expired", json!({})).into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers().get("location").unwrap().to_str().unwrap();
        assert_eq!(location, "/admin/login?expired=1");
        let cookie = response.headers().get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("admin_token=;"));
        assert!(cookie.contains("Max-Age=0"));
    }

    #[test]
    fn test_error_info() {
        let info = AppError::conflict("Guest code already exists", json!({ "code": "FM2026-001" }))
            .to_error_info();
        assert_eq!(info.code, "conflict");
        assert_eq!(info.message, "Guest code already exists");
        assert_eq!(info.details["code"], "FM2026-001");
    }
}
