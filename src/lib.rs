//! # Wedding Invite
//!
//! Wedding invitation site built with Axum: guests open their invitation
//! with a personal code and answer the RSVP; the couple manage the guest
//! list from an admin panel. Guests, event details and authentication live
//! in an external invitation API that this crate talks to over HTTP.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Guests, event details, RSVP rules, countdown, repository traits
//! - **Application Layer** ([`application`]) - Invitation and admin services
//! - **Infrastructure Layer** ([`infrastructure`]) - HTTP client for the invitation API
//! - **Web Layer** ([`web`]) - HTML pages, admin session, SSE countdown
//!
//! ## Quick Start
//!
//! ```bash
//! export API_BASE_URL="https://api.example.com"
//! export PUBLIC_BASE_URL="https://boda.example.com"
//! export EVENT_STARTS_AT="2026-01-17T15:00:00-06:00"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for the admin CLI
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AdminService, AdminSession, InvitationService};
    pub use crate::domain::entities::{Capacity, Guest, GuestStats, GuestStatus, Invitation};
    pub use crate::domain::rsvp::RsvpAnswer;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
