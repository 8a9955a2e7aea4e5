//! Admin panel pages: login, guest list, guest editing.
//!
//! Every page under `/admin` except the login page sits behind
//! [`crate::web::middleware::admin_auth`]. Handlers return
//! `Result<Response, AppError>` so that an [`AppError::Unauthorized`] from the
//! invitation API ends the session; every other failure is rendered inline as
//! a message on the page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Extension, Form,
    extract::{Path, Query, State},
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::application::services::{AdminSession, GuestDraft};
use crate::domain::entities::{Guest, GuestPatch, GuestStats, GuestStatus};
use crate::domain::repositories::Credentials;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::next_sequential_code;
use crate::web::middleware::admin_auth::{clear_session_cookie, session_cookie};
use crate::web::views::{Action, Banner, GuestRow, admin_notice, error_banner};

const DASHBOARD_PATH: &str = "/admin";

#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct AdminLoginTemplate {
    pub banner: Option<Banner>,
    pub username: String,
}

/// Renders `templates/admin/dashboard.html`: statistics, the guest table and
/// the "new guest" form.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct AdminDashboardTemplate {
    pub banner: Option<Banner>,
    pub rows: Vec<GuestRow>,
    pub stats: Option<GuestStats>,
    pub form: GuestFormValues,
    /// Code the next guest gets when the code field is left blank.
    pub next_code: String,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/edit.html")]
pub struct AdminEditTemplate {
    pub banner: Option<Banner>,
    pub id: i64,
    pub code: String,
    pub form: GuestFormValues,
    pub status: String,
}

/// Raw form values, echoed back into the form after a failed submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestFormValues {
    pub name: String,
    pub adults: String,
    pub children: String,
    pub code: String,
}

impl GuestFormValues {
    fn from_guest(guest: &Guest) -> Self {
        Self {
            name: guest.name.clone(),
            adults: guest.capacity.adults.to_string(),
            children: guest.capacity.children.to_string(),
            code: guest.code.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    pub expired: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub secret_code: String,
}

impl From<LoginForm> for Credentials {
    fn from(form: LoginForm) -> Self {
        Credentials {
            username: form.username,
            password: form.password,
            secret_code: form.secret_code,
        }
    }
}

/// Notice shown after a redirect back to the dashboard.
#[derive(Debug, Deserialize)]
pub struct NoticeQuery {
    pub aviso: Option<String>,
    pub codigo: Option<String>,
}

/// New-guest form, as typed.
///
/// Every field arrives as text so that a malformed number still reaches the
/// handler and is reported on the page; [`GuestForm::input`] parses it.
#[derive(Debug, Default, Deserialize)]
pub struct GuestForm {
    #[serde(default)]
    pub nombres: String,
    #[serde(default)]
    pub max_adultos: String,
    #[serde(default)]
    pub max_ninos: String,
    #[serde(default)]
    pub codigo: String,
}

impl GuestForm {
    fn values(&self) -> GuestFormValues {
        GuestFormValues {
            name: self.nombres.clone(),
            adults: self.max_adultos.clone(),
            children: self.max_ninos.clone(),
            code: self.codigo.clone(),
        }
    }

    fn input(&self) -> Result<GuestInput, AppError> {
        GuestInput::parse(&self.nombres, &self.max_adultos, &self.max_ninos)
    }

    fn into_draft(self, input: GuestInput) -> GuestDraft {
        GuestDraft {
            name: input.name,
            adults: input.adults.unwrap_or_default(),
            children: input.children.unwrap_or_default(),
            code: Some(self.codigo),
        }
    }
}

/// Edit form. Also carries the admin status override.
#[derive(Debug, Default, Deserialize)]
pub struct GuestEditForm {
    #[serde(default)]
    pub nombres: String,
    #[serde(default)]
    pub max_adultos: String,
    #[serde(default)]
    pub max_ninos: String,
    #[serde(default)]
    pub estado: String,
}

impl GuestEditForm {
    fn values(&self, code: &str) -> GuestFormValues {
        GuestFormValues {
            name: self.nombres.clone(),
            adults: self.max_adultos.clone(),
            children: self.max_ninos.clone(),
            code: code.to_string(),
        }
    }

    /// Blank means "leave the status alone".
    fn status(&self) -> Result<Option<GuestStatus>, AppError> {
        let raw = self.estado.trim();
        if raw.is_empty() {
            return Ok(None);
        }

        raw.parse().map(Some).map_err(|reason: String| {
            AppError::bad_request(
                "Unknown guest status",
                json!({ "field": "estado", "value": raw, "reason": reason }),
            )
        })
    }

    fn to_patch(&self) -> Result<GuestPatch, AppError> {
        let input = GuestInput::parse(&self.nombres, &self.max_adultos, &self.max_ninos)?;

        Ok(GuestPatch {
            name: Some(input.name),
            adults: input.adults,
            children: Some(input.children.unwrap_or_default()),
            status: self.status()?,
        })
    }
}

/// Guest fields shared by both forms, once the numbers are parsed.
#[derive(Debug, Validate)]
struct GuestInput {
    #[validate(length(max = 200, message = "Name is too long"))]
    name: String,

    #[validate(required, range(min = 1, max = 50))]
    adults: Option<u32>,

    #[validate(range(max = 50))]
    children: Option<u32>,
}

impl GuestInput {
    fn parse(name: &str, adults: &str, children: &str) -> Result<Self, AppError> {
        let input = Self {
            name: name.to_string(),
            adults: parse_count("max_adultos", adults)?,
            children: parse_count("max_ninos", children)?,
        };
        input.validate()?;
        Ok(input)
    }
}

/// An empty number input means "not given".
fn parse_count(field: &'static str, raw: &str) -> Result<Option<u32>, AppError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }

    raw.parse().map(Some).map_err(|_| {
        AppError::bad_request(
            "Expected a whole number",
            json!({ "field": field, "value": raw }),
        )
    })
}

/// # Endpoint
///
/// `GET /admin/login` (`?expired=1` after a forced logout)
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> impl IntoResponse {
    let banner = query.expired.map(|_| {
        Banner::error(
            "Sesión expirada",
            "Tu sesión ha expirado. Por favor inicia sesión nuevamente.",
        )
    });

    AdminLoginTemplate {
        banner,
        username: String::new(),
    }
}

/// Logs in against the invitation API.
///
/// # Endpoint
///
/// `POST /admin/login` (form fields `username`, `password`, `secret_code`)
///
/// # Response
///
/// - **303 See Other** to `/admin` with the session cookie set
/// - The login page with an error message otherwise
pub async fn login_handler(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let username = form.username.clone();

    match state.admin_service.login(&form.into()).await {
        Ok(session) => (
            [(
                SET_COOKIE,
                session_cookie(&session.token, state.settings.cookie_secure),
            )],
            Redirect::to(DASHBOARD_PATH),
        )
            .into_response(),
        Err(e) => {
            tracing::info!(username = %username, error = %e, "Admin login rejected");
            let banner = error_banner(Action::Login, &e);
            (
                e.status_code(),
                AdminLoginTemplate {
                    banner: Some(banner),
                    username,
                },
            )
                .into_response()
        }
    }
}

/// # Endpoint
///
/// `POST /admin/logout`
pub async fn logout_handler() -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie())],
        Redirect::to(crate::web::middleware::admin_auth::LOGIN_PATH),
    )
}

/// Guest list with statistics.
///
/// # Endpoint
///
/// `GET /admin` (optional `?aviso=creado|actualizado|eliminado&codigo=<code>`)
pub async fn dashboard_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Query(query): Query<NoticeQuery>,
) -> Result<Response, AppError> {
    let banner = query
        .aviso
        .as_deref()
        .and_then(|kind| admin_notice(kind, query.codigo.as_deref()));

    render_dashboard(
        &state,
        &session,
        StatusCode::OK,
        banner,
        GuestFormValues::default(),
    )
    .await
}

/// Creates a guest.
///
/// # Endpoint
///
/// `POST /admin/guests` (form fields `nombres`, `max_adultos`,
/// `max_ninos`, `codigo`)
///
/// On success redirects to the dashboard with the new code in the notice.
/// A blank code gets the next one in sequence; a code already used by a
/// listed guest is rejected before anything is sent.
pub async fn create_guest_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Form(form): Form<GuestForm>,
) -> Result<Response, AppError> {
    let values = form.values();

    let input = match form.input() {
        Ok(input) => input,
        Err(e) => {
            let banner = error_banner(Action::SaveGuest, &e);
            return render_dashboard(&state, &session, e.status_code(), Some(banner), values).await;
        }
    };

    let result = async {
        let known = state.admin_service.list_guests(&session).await?;
        state
            .admin_service
            .create_guest(&session, form.into_draft(input), &known)
            .await
    }
    .await;

    match result {
        Ok(created) => Ok(Redirect::to(&notice_path("creado", Some(&created.code))).into_response()),
        Err(e) if e.is_unauthorized() => Err(e),
        Err(e) => {
            let banner = error_banner(Action::SaveGuest, &e);
            render_dashboard(&state, &session, e.status_code(), Some(banner), values).await
        }
    }
}

/// # Endpoint
///
/// `GET /admin/guests/{id}/edit`
pub async fn edit_page(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let guest = find_guest(&state, &session, id).await?;

    Ok(AdminEditTemplate {
        banner: None,
        id,
        code: guest.code.clone(),
        form: GuestFormValues::from_guest(&guest),
        status: guest.status.as_str().to_string(),
    }
    .into_response())
}

/// Updates a guest, including an RSVP status override.
///
/// # Endpoint
///
/// `POST /admin/guests/{id}` (form fields `nombres`, `max_adultos`,
/// `max_ninos`, `estado`)
pub async fn update_guest_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
    Form(form): Form<GuestEditForm>,
) -> Result<Response, AppError> {
    let guest = find_guest(&state, &session, id).await?;

    let result = match form.to_patch() {
        Ok(patch) => state.admin_service.update_guest(&session, id, patch).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(updated) => Ok(Redirect::to(&notice_path("actualizado", Some(&updated.code))).into_response()),
        Err(e) if e.is_unauthorized() => Err(e),
        Err(e) => {
            let banner = error_banner(Action::SaveGuest, &e);
            let page = AdminEditTemplate {
                banner: Some(banner),
                id,
                code: guest.code.clone(),
                form: form.values(&guest.code),
                status: form
                    .status()
                    .ok()
                    .flatten()
                    .unwrap_or(guest.status)
                    .as_str()
                    .to_string(),
            };
            Ok((e.status_code(), page).into_response())
        }
    }
}

/// # Endpoint
///
/// `POST /admin/guests/{id}/delete`
pub async fn delete_guest_handler(
    State(state): State<AppState>,
    Extension(session): Extension<AdminSession>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    match state.admin_service.delete_guest(&session, id).await {
        Ok(()) => Ok(Redirect::to(&notice_path("eliminado", None)).into_response()),
        Err(e) if e.is_unauthorized() => Err(e),
        Err(e) => {
            let banner = error_banner(Action::DeleteGuest, &e);
            render_dashboard(
                &state,
                &session,
                e.status_code(),
                Some(banner),
                GuestFormValues::default(),
            )
            .await
        }
    }
}

async fn render_dashboard(
    state: &AppState,
    session: &AdminSession,
    status: StatusCode,
    banner: Option<Banner>,
    form: GuestFormValues,
) -> Result<Response, AppError> {
    let (dashboard, status, banner) = match state.admin_service.dashboard(session).await {
        Ok(dashboard) => (Some(dashboard), status, banner),
        Err(e) if e.is_unauthorized() => return Err(e),
        Err(e) => {
            tracing::warn!(error = %e, details = %e.details(), "Failed to load admin dashboard");
            (
                None,
                e.status_code(),
                Some(banner.unwrap_or_else(|| error_banner(Action::LoadDashboard, &e))),
            )
        }
    };

    let (guests, stats) = match dashboard {
        Some(d) => (d.guests, d.stats),
        None => (Vec::new(), None),
    };

    let public_base_url = &state.settings.public_base_url;
    let page = AdminDashboardTemplate {
        banner,
        rows: guests
            .iter()
            .map(|g| GuestRow::build(g, public_base_url))
            .collect(),
        stats,
        form,
        next_code: next_sequential_code(
            state.admin_service.code_prefix(),
            guests.iter().map(|g| &g.code),
        ),
    };

    Ok((status, page).into_response())
}

async fn find_guest(state: &AppState, session: &AdminSession, id: i64) -> Result<Guest, AppError> {
    state
        .admin_service
        .list_guests(session)
        .await?
        .into_iter()
        .find(|g| g.id == id)
        .ok_or_else(|| AppError::not_found("Guest not found", json!({ "id": id })))
}

/// `/admin?aviso=<kind>[&codigo=<code>]`
fn notice_path(kind: &str, code: Option<&str>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query.append_pair("aviso", kind);
    if let Some(code) = code {
        query.append_pair("codigo", code);
    }
    format!("{DASHBOARD_PATH}?{}", query.finish())
}
