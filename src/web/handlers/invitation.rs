//! Guest-facing pages: code entry, invitation and RSVP.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use chrono::Utc;
use serde::Deserialize;

use crate::application::services::InvitationSession;
use crate::domain::rsvp::RsvpAnswer;
use crate::state::AppState;
use crate::web::views::{Action, Banner, InvitationView, error_banner, rsvp_thanks};

/// Renders `templates/index.html`: the code form, or the invitation once a
/// guest is known.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: Option<InvitationView>,
    pub banner: Option<Banner>,
    /// Last code typed, kept in the form after a failed lookup.
    pub code: String,
}

impl IndexTemplate {
    fn code_entry(banner: Option<Banner>, code: String) -> Self {
        Self {
            view: None,
            banner,
            code,
        }
    }

    fn invitation(state: &AppState, session: &InvitationSession, banner: Option<Banner>) -> Self {
        Self {
            view: Some(InvitationView::build(
                session.invitation(),
                &state.settings,
                Utc::now(),
            )),
            banner,
            code: String::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    pub uuid: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CodeForm {
    #[serde(default)]
    pub codigo: String,
}

#[derive(Debug, Deserialize)]
pub struct RsvpForm {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub respuesta: String,
}

/// Landing page.
///
/// # Endpoint
///
/// `GET /` or `GET /?uuid=<uuid>`
///
/// Without `uuid` the code form is shown. With it, the invitation for that
/// guest is loaded; an unknown UUID falls back to the code form with an
/// error message.
pub async fn index_handler(State(state): State<AppState>, Query(query): Query<IndexQuery>) -> Response {
    let uuid = query.uuid.unwrap_or_default();
    if uuid.trim().is_empty() {
        return IndexTemplate::code_entry(None, String::new()).into_response();
    }

    match state.invitation_service.load_invitation(&uuid).await {
        Ok(session) => IndexTemplate::invitation(&state, &session, None).into_response(),
        Err(e) => {
            tracing::info!(uuid = %uuid, error = %e, "Invitation could not be loaded");
            let banner = error_banner(Action::LoadInvitation, &e);
            (
                e.status_code(),
                IndexTemplate::code_entry(Some(banner), String::new()),
            )
                .into_response()
        }
    }
}

/// Resolves a guest code.
///
/// # Endpoint
///
/// `POST /validar` (form field `codigo`)
///
/// # Response
///
/// - **303 See Other** to `/?uuid=<uuid>` so the page can be reloaded or shared
/// - The code form again with an error message otherwise
pub async fn validate_code_handler(State(state): State<AppState>, Form(form): Form<CodeForm>) -> Response {
    match state.invitation_service.resolve_code(&form.codigo).await {
        Ok(uuid) => Redirect::to(&invitation_path(&uuid)).into_response(),
        Err(e) => {
            let banner = error_banner(Action::LookupCode, &e);
            (
                e.status_code(),
                IndexTemplate::code_entry(Some(banner), form.codigo),
            )
                .into_response()
        }
    }
}

/// Records a guest's answer.
///
/// # Endpoint
///
/// `POST /rsvp` (form fields `uuid`, `respuesta` = `si` | `no`)
///
/// The page is rendered from the guest the API returns, so the response
/// buttons disappear and the API's confirmation text is shown. On failure
/// the invitation is shown unchanged with an error message and the guest
/// can try again.
pub async fn rsvp_handler(State(state): State<AppState>, Form(form): Form<RsvpForm>) -> Response {
    let mut session = match state.invitation_service.load_invitation(&form.uuid).await {
        Ok(session) => session,
        Err(e) => {
            let banner = error_banner(Action::LoadInvitation, &e);
            return (
                e.status_code(),
                IndexTemplate::code_entry(Some(banner), String::new()),
            )
                .into_response();
        }
    };

    let answer = match form.respuesta.parse::<RsvpAnswer>() {
        Ok(answer) => answer,
        Err(e) => {
            let banner = error_banner(Action::Rsvp, &e);
            return (
                e.status_code(),
                IndexTemplate::invitation(&state, &session, Some(banner)),
            )
                .into_response();
        }
    };

    match state
        .invitation_service
        .submit_rsvp(&mut session, answer)
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            IndexTemplate::invitation(&state, &session, Some(rsvp_thanks(answer))),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(uuid = %session.uuid(), error = %e, "RSVP submission failed");
            let banner = error_banner(Action::Rsvp, &e);
            (
                e.status_code(),
                IndexTemplate::invitation(&state, &session, Some(banner)),
            )
                .into_response()
        }
    }
}

/// `/?uuid=<uuid>`, with the UUID query-encoded.
pub fn invitation_path(uuid: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(uuid.as_bytes()).collect();
    format!("/?uuid={encoded}")
}
