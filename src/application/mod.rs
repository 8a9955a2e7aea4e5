//! Application layer services implementing the invitation flows.
//!
//! Services coordinate repository calls, input validation and the RSVP and
//! guest-code rules. They program against the repository traits, so
//! handlers and the admin CLI share them unchanged.
//!
//! # Available Services
//!
//! - [`services::invitation_service::InvitationService`] - Guest code resolution and RSVP
//! - [`services::admin_service::AdminService`] - Admin login, guest CRUD and statistics

pub mod services;
