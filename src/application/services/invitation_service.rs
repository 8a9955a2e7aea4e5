//! Public invitation flow: code resolution, invitation loading and RSVP.

use std::sync::Arc;

use crate::domain::entities::{EventDetails, Guest, Invitation};
use crate::domain::repositories::GuestRepository;
use crate::domain::rsvp::{RsvpAnswer, RsvpRequest};
use crate::error::AppError;
use crate::utils::code_generator::normalize_code;
use serde_json::json;

/// The invitation a visitor currently has open.
///
/// Rebuilt for every request from the `uuid` in the URL, so nothing about a
/// visitor is kept in the server between requests.
#[derive(Debug, Clone, PartialEq)]
pub struct InvitationSession {
    invitation: Invitation,
}

impl InvitationSession {
    pub fn new(invitation: Invitation) -> Self {
        Self { invitation }
    }

    pub fn invitation(&self) -> &Invitation {
        &self.invitation
    }

    pub fn guest(&self) -> &Guest {
        &self.invitation.guest
    }

    pub fn uuid(&self) -> &str {
        &self.invitation.guest.uuid
    }
}

/// Service behind the guest-facing pages.
pub struct InvitationService<R: GuestRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: GuestRepository + ?Sized> InvitationService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Resolves a code typed by a guest to the guest's UUID.
    ///
    /// The code is trimmed and uppercased first.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the code is empty (no request is made)
    /// - [`AppError::NotFound`] if no guest has this code
    /// - [`AppError::Unavailable`] / [`AppError::Upstream`] if the API fails
    pub async fn resolve_code(&self, raw: &str) -> Result<String, AppError> {
        let code = normalize_code(raw);
        if code.is_empty() {
            return Err(AppError::bad_request(
                "A guest code is required",
                json!({ "field": "codigo" }),
            ));
        }

        match self.repository.find_by_code(&code).await {
            Ok(guest) => {
                tracing::info!(code = %code, uuid = %guest.uuid, "Guest code resolved");
                Ok(guest.uuid)
            }
            Err(AppError::NotFound { details, .. }) => {
                tracing::info!(code = %code, "Unknown guest code");
                Err(AppError::not_found(
                    "Invalid guest code",
                    json!({ "code": code, "upstream": details }),
                ))
            }
            Err(e) => Err(e),
        }
    }

    /// Loads the event data and the guest owning `uuid`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `uuid` is blank
    /// - [`AppError::NotFound`] if the UUID is unknown
    pub async fn load_invitation(&self, uuid: &str) -> Result<InvitationSession, AppError> {
        let uuid = uuid.trim();
        if uuid.is_empty() {
            return Err(AppError::bad_request(
                "An invitation id is required",
                json!({ "field": "uuid" }),
            ));
        }

        let invitation = self.repository.load_invitation(uuid).await?;
        Ok(InvitationSession::new(invitation))
    }

    /// Resolves a code and loads the matching invitation.
    pub async fn open_with_code(&self, raw: &str) -> Result<InvitationSession, AppError> {
        let uuid = self.resolve_code(raw).await?;
        self.load_invitation(&uuid).await
    }

    /// Submits the guest's answer and replaces the session's guest with the
    /// one the API returns.
    ///
    /// `Yes` confirms the full invited capacity; `No` sends no counts.
    ///
    /// # Errors
    ///
    /// - [`AppError::Conflict`] if the guest already responded (no request is made)
    /// - Any API error, unchanged, so the visitor can retry
    pub async fn submit_rsvp(
        &self,
        session: &mut InvitationSession,
        answer: RsvpAnswer,
    ) -> Result<(), AppError> {
        let guest = session.guest();
        if guest.status.transition(answer).is_none() {
            return Err(AppError::conflict(
                "This invitation has already been answered",
                json!({ "uuid": guest.uuid, "status": guest.status.as_str() }),
            ));
        }

        let request = RsvpRequest::for_guest(answer, guest);
        let updated = self.repository.submit_rsvp(session.uuid(), request).await?;

        tracing::info!(
            uuid = %updated.uuid,
            status = %updated.status,
            adults = updated.attending.adults,
            children = updated.attending.children,
            "RSVP recorded"
        );

        session.invitation.guest = updated;
        Ok(())
    }

    /// Public event details, without a guest.
    pub async fn event_details(&self) -> Result<EventDetails, AppError> {
        self.repository.event_details().await
    }
}
