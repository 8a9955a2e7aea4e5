//! Cookie-based session middleware for the admin panel.

use axum::{
    extract::Request,
    http::{HeaderMap, header::COOKIE},
    middleware::Next,
    response::{Redirect, Response},
};

use crate::application::services::AdminSession;

/// Name of the cookie holding the admin bearer token.
pub const ADMIN_COOKIE: &str = "admin_token";

pub const LOGIN_PATH: &str = "/admin/login";

/// `Set-Cookie` value storing the token for the admin pages only.
pub fn session_cookie(token: &str, secure: bool) -> String {
    let mut cookie = format!("{ADMIN_COOKIE}={token}; Path=/admin; HttpOnly; SameSite=Strict");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that deletes the session cookie.
pub fn clear_session_cookie() -> String {
    format!("{ADMIN_COOKIE}=; Path=/admin; HttpOnly; SameSite=Strict; Max-Age=0")
}

/// Reads the admin token from the `Cookie` header.
///
/// Handles multiple cookies by splitting on semicolons; empty values count
/// as missing.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .find_map(|cookie| {
            let mut parts = cookie.trim().splitn(2, '=');
            match (parts.next(), parts.next()) {
                (Some(ADMIN_COOKIE), Some(value)) if !value.is_empty() => Some(value.to_string()),
                _ => None,
            }
        })
}

/// Requires an admin session for the wrapped routes.
///
/// The token itself is not checked here: the invitation API validates it on
/// every call, and a rejection there ends the session (see
/// [`crate::error::AppError::Unauthorized`]). On success the handler receives
/// an `Extension<AdminSession>`.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/", get(dashboard_handler))
///     .route_layer(middleware::from_fn(admin_auth::layer));
/// ```
///
/// # Errors
///
/// Redirects to `/admin/login` when the cookie is missing.
pub async fn layer(mut req: Request, next: Next) -> Result<Response, Redirect> {
    match token_from_headers(req.headers()) {
        Some(token) => {
            req.extensions_mut().insert(AdminSession::new(token));
            Ok(next.run(req).await)
        }
        None => Err(Redirect::to(LOGIN_PATH)),
    }
}
