//! View models for the HTML pages.
//!
//! Everything the templates display is computed here from domain values, so
//! labels, links and RSVP panel state are testable without rendering.

use chrono::{DateTime, Utc};

use crate::domain::countdown::Countdown;
use crate::domain::entities::{Capacity, Guest, GuestStatus, Invitation, Parents, Venue};
use crate::domain::rsvp::RsvpAnswer;
use crate::error::AppError;
use crate::state::SiteSettings;
use crate::utils::links;

/// Fallback shown when an answered guest has no confirmation text.
pub const CONFIRMED_FALLBACK: &str = "Confirmado";

/// A titled message box (the pages' modal / alert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub title: String,
    pub text: String,
    pub success: bool,
}

impl Banner {
    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            success: false,
        }
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            success: true,
        }
    }
}

/// `-1 Adulto-` / `-3 Adultos-`; nothing for zero.
pub fn adults_label(adults: u32) -> Option<String> {
    match adults {
        0 => None,
        1 => Some("-1 Adulto-".to_string()),
        n => Some(format!("-{n} Adultos-")),
    }
}

/// `-1 Niño-` / `-2 Niños-`; nothing for zero.
pub fn children_label(children: u32) -> Option<String> {
    match children {
        0 => None,
        1 => Some("-1 Niño-".to_string()),
        n => Some(format!("-{n} Niños-")),
    }
}

pub fn attend_button_label(capacity: Capacity) -> &'static str {
    if capacity.total() == 1 {
        "Sí, asistiré"
    } else {
        "Sí, asistiremos"
    }
}

/// What the RSVP section shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RsvpPanel {
    /// The guest can still answer.
    Buttons { attend_label: &'static str },
    /// The guest answered; the buttons are hidden.
    Answered { message: String, declined: bool },
}

impl RsvpPanel {
    pub fn for_guest(guest: &Guest) -> Self {
        if guest.status.can_respond() {
            return RsvpPanel::Buttons {
                attend_label: attend_button_label(guest.capacity),
            };
        }

        RsvpPanel::Answered {
            message: guest
                .confirmation_text
                .clone()
                .unwrap_or_else(|| CONFIRMED_FALLBACK.to_string()),
            declined: guest.status == GuestStatus::Declined,
        }
    }

    pub fn shows_buttons(&self) -> bool {
        matches!(self, RsvpPanel::Buttons { .. })
    }

    pub fn attend_label(&self) -> &'static str {
        match self {
            RsvpPanel::Buttons { attend_label } => *attend_label,
            RsvpPanel::Answered { .. } => "",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RsvpPanel::Buttons { .. } => "",
            RsvpPanel::Answered { message, .. } => message,
        }
    }

    pub fn declined(&self) -> bool {
        matches!(self, RsvpPanel::Answered { declined: true, .. })
    }
}

/// Thank-you message after a successful RSVP.
pub fn rsvp_thanks(answer: RsvpAnswer) -> Banner {
    match answer {
        RsvpAnswer::Yes => Banner::success(
            "¡Muchas gracias!",
            "Tu asistencia ha sido confirmada con éxito. ¡Estamos felices de que nos acompañes!",
        ),
        RsvpAnswer::No => Banner::success(
            "Gracias por informarnos",
            "Lamentamos que no puedas asistir, pero agradecemos mucho tu respuesta.",
        ),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub css_class: &'static str,
}

pub fn status_badge(status: GuestStatus) -> StatusBadge {
    match status {
        GuestStatus::Confirmed => StatusBadge {
            label: "Confirmado",
            css_class: "badge-confirmed",
        },
        GuestStatus::Declined => StatusBadge {
            label: "Rechazado",
            css_class: "badge-declined",
        },
        GuestStatus::Pending => StatusBadge {
            label: "Pendiente",
            css_class: "badge-pending",
        },
    }
}

/// Where an error happened, to pick the wording shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LookupCode,
    LoadInvitation,
    Rsvp,
    Login,
    LoadDashboard,
    SaveGuest,
    DeleteGuest,
}

/// User-facing message for an error.
///
/// The API's own `detail` text wins where the admin is the reader, so
/// server-side rejections such as a duplicate code are shown as sent.
pub fn error_banner(action: Action, err: &AppError) -> Banner {
    if matches!(err, AppError::Unavailable { .. }) {
        return Banner::error(
            "Sin conexión",
            "No pudimos conectar con el servidor. Por favor intenta nuevamente.",
        );
    }

    match action {
        Action::LookupCode => match err {
            AppError::Validation { .. } => {
                Banner::error("Código requerido", "Por favor ingresa tu código único")
            }
            _ => Banner::error(
                "Código inválido",
                "El código ingresado no es válido. Por favor verifica e intenta nuevamente.",
            ),
        },
        Action::LoadInvitation => Banner::error(
            "Error",
            "No se pudieron cargar los datos del evento",
        ),
        Action::Rsvp => match err {
            AppError::Conflict { .. } => Banner::error(
                "Respuesta registrada",
                "Tu respuesta ya fue registrada anteriormente.",
            ),
            AppError::Validation { .. } => Banner::error(
                "Respuesta requerida",
                "Por favor indica si podrás asistir.",
            ),
            _ => Banner::error(
                "Error",
                "No se pudo enviar la confirmación. Por favor intenta nuevamente.",
            ),
        },
        Action::Login => match err {
            AppError::Validation { .. } => {
                Banner::error("Campos requeridos", "Por favor completa todos los campos")
            }
            _ => Banner::error(
                "Error al iniciar sesión",
                err.upstream_detail()
                    .unwrap_or("Usuario, contraseña o código secreto incorrectos"),
            ),
        },
        Action::LoadDashboard => Banner::error("Error", "No se pudieron cargar los datos"),
        Action::SaveGuest => match (err, err.upstream_detail()) {
            (_, Some(detail)) => Banner::error("Error", detail),
            (AppError::Conflict { .. }, None) => Banner::error(
                "Código duplicado",
                "Este código ya existe. Por favor usa otro o deja el campo vacío para generar uno automático.",
            ),
            (AppError::Validation { .. }, None) => Banner::error(
                "Campos requeridos",
                "Revisa el nombre, la cantidad de adultos (mínimo 1) y el código.",
            ),
            (AppError::NotFound { .. }, None) => {
                Banner::error("Error", "El invitado ya no existe")
            }
            _ => Banner::error("Error", "No se pudieron guardar los cambios"),
        },
        Action::DeleteGuest => Banner::error(
            "Error",
            err.upstream_detail()
                .unwrap_or("No se pudo eliminar el invitado"),
        ),
    }
}

/// Success notice after an admin mutation, keyed by the `aviso` query value.
pub fn admin_notice(kind: &str, code: Option<&str>) -> Option<Banner> {
    match kind {
        "creado" => Some(Banner::success(
            "¡Invitado agregado!",
            match code {
                Some(code) => format!("El invitado ha sido agregado con el código: {code}"),
                None => "El invitado ha sido agregado".to_string(),
            },
        )),
        "actualizado" => Some(Banner::success(
            "¡Cambios guardados!",
            "Los datos del invitado han sido actualizados",
        )),
        "eliminado" => Some(Banner::success("¡Eliminado!", "El invitado ha sido eliminado")),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VenueView {
    pub place: String,
    pub time: String,
    pub note: Option<String>,
    pub address: Option<String>,
    pub maps_link: String,
    pub waze_link: String,
}

impl VenueView {
    fn from_venue(venue: &Venue) -> Self {
        Self {
            place: venue.place.clone(),
            time: venue.time.clone(),
            note: venue.note.clone(),
            address: venue.address.clone(),
            maps_link: links::maps_link(venue),
            waze_link: links::waze_link(venue),
        }
    }
}

/// Everything the invitation page shows for one guest.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitationView {
    pub uuid: String,
    pub guest_name: String,
    pub adults_label: Option<String>,
    pub children_label: Option<String>,
    pub rsvp: RsvpPanel,
    pub couple_names: String,
    pub date: String,
    pub weekday: String,
    pub rsvp_deadline: String,
    pub dress_code: String,
    pub ceremony: VenueView,
    pub reception: VenueView,
    pub parents: Parents,
    pub share_link: String,
    pub calendar_link: String,
    pub countdown: Countdown,
}

impl InvitationView {
    pub fn build(invitation: &Invitation, settings: &SiteSettings, now: DateTime<Utc>) -> Self {
        let guest = &invitation.guest;
        let event = &invitation.event;

        Self {
            uuid: guest.uuid.clone(),
            guest_name: guest.name.clone(),
            adults_label: adults_label(guest.capacity.adults),
            children_label: children_label(guest.capacity.children),
            rsvp: RsvpPanel::for_guest(guest),
            couple_names: event.couple_names.clone(),
            date: event.date.clone(),
            weekday: event.weekday.clone(),
            rsvp_deadline: event.rsvp_deadline.clone(),
            dress_code: event.dress_code.clone(),
            ceremony: VenueView::from_venue(&event.ceremony),
            reception: VenueView::from_venue(&event.reception),
            parents: invitation.parents.clone(),
            share_link: links::share_link(&settings.public_base_url, &guest.uuid),
            calendar_link: links::calendar_link(
                event,
                settings.event_starts_at,
                settings.event_ends_at(),
            ),
            countdown: Countdown::between(settings.event_starts_at, now),
        }
    }
}

/// One row of the admin guest table.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestRow {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub adults: u32,
    pub children: u32,
    pub capacity_total: u32,
    pub attending_total: u32,
    pub badge: StatusBadge,
    pub confirmation_text: String,
    pub confirmed_at: String,
    pub share_link: String,
}

impl GuestRow {
    pub fn build(guest: &Guest, public_base_url: &str) -> Self {
        Self {
            id: guest.id,
            code: guest.code.clone(),
            name: guest.name.clone(),
            adults: guest.capacity.adults,
            children: guest.capacity.children,
            capacity_total: guest.capacity.total(),
            attending_total: guest.attending.total(),
            badge: status_badge(guest.status),
            confirmation_text: guest.confirmation_text.clone().unwrap_or_default(),
            confirmed_at: guest
                .confirmed_at
                .map(|at| at.format("%d/%m/%Y %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string()),
            share_link: links::share_link(public_base_url, &guest.uuid),
        }
    }
}
