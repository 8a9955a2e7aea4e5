//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use serde::Serialize;

use crate::error::ErrorInfo;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
}

#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub invitation_api: CheckStatus,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Returns site health with a probe of the invitation API.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: The invitation API answers `GET /api/evento`
/// - **503 Service Unavailable**: The API is unreachable or failing
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "invitation_api": {
///       "status": "ok",
///       "message": "Event: Fernando & María"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let api_check = match state.invitation_service.event_details().await {
        Ok(event) => CheckStatus {
            status: "ok".to_string(),
            message: format!("Event: {}", event.couple_names),
            error: None,
        },
        Err(e) => {
            tracing::warn!(error = %e, details = %e.details(), "Invitation API health check failed");
            CheckStatus {
                status: "error".to_string(),
                message: e.to_string(),
                error: Some(e.to_error_info()),
            }
        }
    };

    let healthy = api_check.status == "ok";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            invitation_api: api_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
