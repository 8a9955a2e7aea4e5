//! Paths of the invitation API.

use std::fmt;

/// One endpoint of the invitation API, with its path parameters.
///
/// Path parameters are inserted as single URL segments, so a guest code
/// containing `/` or spaces cannot escape its segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint<'a> {
    /// `GET /api/invitado-codigo/{code}`
    GuestByCode(&'a str),
    /// `GET /api/datos-completos/{uuid}`
    CompleteData(&'a str),
    /// `POST /api/invitado/{uuid}/rsvp`
    Rsvp(&'a str),
    /// `GET /api/evento`
    Event,
    /// `POST /api/auth/login`
    Login,
    /// `GET|POST /api/admin/invitados`
    AdminGuests,
    /// `PUT|DELETE /api/admin/invitados/{id}`
    AdminGuest(i64),
    /// `GET /api/admin/estadisticas`
    AdminStats,
}

impl Endpoint<'_> {
    pub fn segments(&self) -> Vec<String> {
        let parts: Vec<String> = match self {
            Endpoint::GuestByCode(code) => vec!["invitado-codigo".into(), (*code).into()],
            Endpoint::CompleteData(uuid) => vec!["datos-completos".into(), (*uuid).into()],
            Endpoint::Rsvp(uuid) => vec!["invitado".into(), (*uuid).into(), "rsvp".into()],
            Endpoint::Event => vec!["evento".into()],
            Endpoint::Login => vec!["auth".into(), "login".into()],
            Endpoint::AdminGuests => vec!["admin".into(), "invitados".into()],
            Endpoint::AdminGuest(id) => vec!["admin".into(), "invitados".into(), id.to_string()],
            Endpoint::AdminStats => vec!["admin".into(), "estadisticas".into()],
        };

        std::iter::once("api".to_string()).chain(parts).collect()
    }
}

impl fmt::Display for Endpoint<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.segments().join("/"))
    }
}
