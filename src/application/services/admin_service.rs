//! Admin panel orchestration: login, guest management and statistics.

use std::sync::Arc;

use crate::domain::entities::{Capacity, Guest, GuestPatch, GuestStats, NewGuest};
use crate::domain::repositories::{AdminRepository, Credentials};
use crate::error::AppError;
use crate::utils::code_generator::{next_sequential_code, normalize_code, validate_custom_code};
use serde_json::json;

/// An authenticated admin, identified by the bearer token from login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminSession {
    pub token: String,
}

impl AdminSession {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Guest list plus statistics, as shown on the admin dashboard.
///
/// `stats` is `None` when the statistics call failed for a reason other
/// than an expired session.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub guests: Vec<Guest>,
    pub stats: Option<GuestStats>,
}

/// A guest as entered in the admin form, before validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuestDraft {
    pub name: String,
    pub adults: u32,
    pub children: u32,
    /// Blank means "generate the next sequential code".
    pub code: Option<String>,
}

pub struct AdminService<R: AdminRepository + ?Sized> {
    repository: Arc<R>,
    code_prefix: String,
}

impl<R: AdminRepository + ?Sized> AdminService<R> {
    pub fn new(repository: Arc<R>, code_prefix: impl Into<String>) -> Self {
        Self {
            repository,
            code_prefix: code_prefix.into(),
        }
    }

    pub fn code_prefix(&self) -> &str {
        &self.code_prefix
    }

    /// Logs in and returns the session for the issued token.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if any credential is blank (no request is made)
    /// - [`AppError::Unauthorized`] if the API rejects the credentials
    pub async fn login(&self, credentials: &Credentials) -> Result<AdminSession, AppError> {
        let missing: Vec<&str> = [
            ("username", &credentials.username),
            ("password", &credentials.password),
            ("secret_code", &credentials.secret_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();

        if !missing.is_empty() {
            return Err(AppError::bad_request(
                "All login fields are required",
                json!({ "missing": missing }),
            ));
        }

        let token = self.repository.login(credentials).await?;
        tracing::info!(username = %credentials.username, "Admin logged in");

        Ok(AdminSession::new(token))
    }

    pub async fn list_guests(&self, session: &AdminSession) -> Result<Vec<Guest>, AppError> {
        self.repository.list_guests(&session.token).await
    }

    pub async fn stats(&self, session: &AdminSession) -> Result<GuestStats, AppError> {
        self.repository.stats(&session.token).await
    }

    /// Loads the guest list and the statistics together.
    ///
    /// A failing statistics call is logged and tolerated, except for
    /// [`AppError::Unauthorized`], which always propagates.
    pub async fn dashboard(&self, session: &AdminSession) -> Result<Dashboard, AppError> {
        let (guests, stats) = tokio::join!(self.list_guests(session), self.stats(session));
        let guests = guests?;

        let stats = match stats {
            Ok(stats) => Some(stats),
            Err(e) if e.is_unauthorized() => return Err(e),
            Err(e) => {
                tracing::warn!(error = %e, details = %e.details(), "Failed to load guest statistics");
                None
            }
        };

        Ok(Dashboard { guests, stats })
    }

    /// Creates a guest.
    ///
    /// A supplied code is normalized and checked against `known_guests`
    /// before anything is sent; a blank code is replaced by the next code
    /// in sequence. Duplicates only detectable by the API come back as the
    /// API's own error.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] for a blank name, zero adults or a malformed code
    /// - [`AppError::Conflict`] if the code is already used by a known guest
    pub async fn create_guest(
        &self,
        session: &AdminSession,
        draft: GuestDraft,
        known_guests: &[Guest],
    ) -> Result<Guest, AppError> {
        let name = draft.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::bad_request(
                "Guest name is required",
                json!({ "field": "nombres" }),
            ));
        }

        if draft.adults < 1 {
            return Err(AppError::bad_request(
                "At least one adult is required",
                json!({ "field": "max_adultos", "value": draft.adults }),
            ));
        }

        let requested = draft
            .code
            .as_deref()
            .map(normalize_code)
            .filter(|code| !code.is_empty());

        let code = match requested {
            Some(code) => {
                validate_custom_code(&code)?;

                if known_guests.iter().any(|g| normalize_code(&g.code) == code) {
                    return Err(AppError::conflict(
                        "Guest code already exists",
                        json!({ "code": code }),
                    ));
                }

                code
            }
            None => next_sequential_code(&self.code_prefix, known_guests.iter().map(|g| &g.code)),
        };

        let new_guest = NewGuest {
            name,
            capacity: Capacity::new(draft.adults, draft.children),
            code: Some(code),
        };

        let created = self.repository.create_guest(&session.token, new_guest).await?;
        tracing::info!(id = created.id, code = %created.code, "Guest created");

        Ok(created)
    }

    /// Applies a partial update, including admin status overrides.
    ///
    /// # Errors
    ///
    /// [`AppError::Validation`] for an empty patch, a blank name or zero adults.
    pub async fn update_guest(
        &self,
        session: &AdminSession,
        id: i64,
        mut patch: GuestPatch,
    ) -> Result<Guest, AppError> {
        if patch.is_empty() {
            return Err(AppError::bad_request(
                "Nothing to update",
                json!({ "id": id }),
            ));
        }

        if let Some(name) = patch.name.as_mut() {
            *name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::bad_request(
                    "Guest name is required",
                    json!({ "field": "nombres" }),
                ));
            }
        }

        if patch.adults == Some(0) {
            return Err(AppError::bad_request(
                "At least one adult is required",
                json!({ "field": "max_adultos", "value": 0 }),
            ));
        }

        let updated = self.repository.update_guest(&session.token, id, patch).await?;
        tracing::info!(id, status = %updated.status, "Guest updated");

        Ok(updated)
    }

    pub async fn delete_guest(&self, session: &AdminSession, id: i64) -> Result<(), AppError> {
        self.repository.delete_guest(&session.token, id).await?;
        tracing::info!(id, "Guest deleted");
        Ok(())
    }
}
