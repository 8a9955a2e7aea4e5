//! Repository trait for the public (guest-facing) side of the invitation API.

use crate::domain::entities::{EventDetails, Guest, Invitation};
use crate::domain::rsvp::RsvpRequest;
use crate::error::AppError;
use async_trait::async_trait;

/// Public invitation operations. No credentials are involved.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpGuestRepository`] - REST client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestRepository: Send + Sync {
    /// Looks a guest up by its human-entered code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no guest has this code.
    async fn find_by_code(&self, code: &str) -> Result<Guest, AppError>;

    /// Loads the event details together with the guest owning `uuid`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the UUID is unknown.
    async fn load_invitation(&self, uuid: &str) -> Result<Invitation, AppError>;

    /// Records the guest's answer and returns the guest as stored upstream.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the UUID is unknown.
    async fn submit_rsvp(&self, uuid: &str, request: RsvpRequest) -> Result<Guest, AppError>;

    /// Fetches the public event details (no guest attached).
    async fn event_details(&self) -> Result<EventDetails, AppError>;
}
