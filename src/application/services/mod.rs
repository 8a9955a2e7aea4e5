//! Business logic services for the application layer.

pub mod admin_service;
pub mod invitation_service;

pub use admin_service::{AdminService, AdminSession, Dashboard, GuestDraft};
pub use invitation_service::{InvitationService, InvitationSession};
