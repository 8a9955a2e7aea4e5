//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`            - Code form / invitation (public)
//! - `POST /validar`     - Guest code lookup (public, rate limited)
//! - `POST /rsvp`        - RSVP submission (public)
//! - `GET  /countdown`   - Countdown as Server-Sent Events (public)
//! - `GET  /health`      - Health check with invitation API probe (public)
//! - `/admin/*`          - Admin panel (cookie session required, except login)
//! - `/static/*`         - Static assets
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on code lookup and admin login
//! - **Authentication** - Admin session cookie
//! - **Path normalization** - Trailing slash handling

use crate::state::AppState;
use crate::web;
use crate::web::handlers::{countdown_handler, health_handler};
use crate::web::middleware::{admin_auth, tracing};
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Builds every route with its middleware, without path normalization.
///
/// Tests drive this router directly.
pub fn site_router(state: AppState) -> Router {
    let admin_protected = web::routes::admin_protected_routes()
        .route_layer(middleware::from_fn(admin_auth::layer));

    let admin_router = Router::new()
        .merge(admin_protected)
        .merge(web::routes::admin_public_routes());

    Router::new()
        .merge(web::routes::public_routes())
        .route("/countdown", get(countdown_handler))
        .route("/health", get(health_handler))
        .nest("/admin", admin_router)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/admin/` reaches the
/// dashboard.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(site_router(state))
}
