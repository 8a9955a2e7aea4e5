//! Shared application state injected into every handler.

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;

use crate::application::services::{AdminService, InvitationService};
use crate::config::Config;
use crate::domain::repositories::{AdminRepository, GuestRepository};

/// Immutable site settings the pages need.
#[derive(Debug, Clone)]
pub struct SiteSettings {
    /// Origin used in share links, without trailing slash.
    pub public_base_url: String,
    pub event_starts_at: DateTime<Utc>,
    pub event_duration: Duration,
    pub cookie_secure: bool,
}

impl SiteSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            public_base_url: config.public_base_url.clone(),
            event_starts_at: config.event_starts_at,
            event_duration: Duration::hours(i64::from(config.event_duration_hours)),
            cookie_secure: config.cookie_secure,
        }
    }

    pub fn event_ends_at(&self) -> DateTime<Utc> {
        self.event_starts_at + self.event_duration
    }
}

/// Services and settings shared by all requests.
///
/// Holds no per-visitor data: guest and admin sessions are rebuilt from each
/// request.
#[derive(Clone)]
pub struct AppState {
    pub invitation_service: Arc<InvitationService<dyn GuestRepository>>,
    pub admin_service: Arc<AdminService<dyn AdminRepository>>,
    pub settings: Arc<SiteSettings>,
}

impl AppState {
    pub fn new(
        guest_repository: Arc<dyn GuestRepository>,
        admin_repository: Arc<dyn AdminRepository>,
        code_prefix: impl Into<String>,
        settings: SiteSettings,
    ) -> Self {
        Self {
            invitation_service: Arc::new(InvitationService::new(guest_repository)),
            admin_service: Arc::new(AdminService::new(admin_repository, code_prefix)),
            settings: Arc::new(settings),
        }
    }
}
