//! Route tables for the guest site and the admin panel.

use crate::state::AppState;
use crate::web::handlers::{
    create_guest_handler, dashboard_handler, delete_guest_handler, edit_page, index_handler,
    login_handler, login_page, logout_handler, rsvp_handler, update_guest_handler,
    validate_code_handler,
};
use crate::web::middleware::rate_limit;
use axum::{
    Router,
    routing::{get, post},
};

/// Guest-facing routes.
///
/// # Endpoints
///
/// - `GET  /`         - Code form, or the invitation with `?uuid=`
/// - `POST /validar`  - Code lookup (rate limited)
/// - `POST /rsvp`     - RSVP submission
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route(
            "/validar",
            post(validate_code_handler).layer(rate_limit::layer()),
        )
        .route("/rsvp", post(rsvp_handler))
}

/// Admin routes requiring a session cookie.
///
/// Protected via [`crate::web::middleware::admin_auth`].
///
/// # Endpoints
///
/// - `GET  /`                        - Guest list and statistics
/// - `POST /guests`                  - Create guest
/// - `GET  /guests/{id}/edit`        - Edit form
/// - `POST /guests/{id}`             - Update guest
/// - `POST /guests/{id}/delete`      - Delete guest
pub fn admin_protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/guests", post(create_guest_handler))
        .route("/guests/{id}", post(update_guest_handler))
        .route("/guests/{id}/edit", get(edit_page))
        .route("/guests/{id}/delete", post(delete_guest_handler))
}

/// Admin routes without a session.
///
/// # Endpoints
///
/// - `GET  /login`  - Login page
/// - `POST /login`  - Login (rate limited)
/// - `POST /logout` - Clears the session cookie
pub fn admin_public_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(login_page).merge(post(login_handler).layer(rate_limit::layer())),
        )
        .route("/logout", post(logout_handler))
}
